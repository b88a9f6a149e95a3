//! The player: queued grid jumps, landing checks and the death countdown

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::row::Row;
use super::sprite::{Anchor, SpriteId, SpriteSink, player_sprite};
use super::state::{Direction, PlayerState, Spawner};
use crate::consts::*;

/// Something that happened to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped(Direction),
    Crushed { x: f32, y: f32 },
    Drowned { x: f32, y: f32 },
    /// Fell off the bottom of the screen; the eagle takes over at `x`
    Carried { x: f32 },
}

/// The hopping player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub state: PlayerState,
    pub direction: Direction,
    /// Jump ticks remaining while alive; death countdown otherwise
    pub timer: i32,
    pub input_queue: VecDeque<Direction>,
    /// Highest point reached (lowest y), for scoring
    pub min_y: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            state: PlayerState::Alive,
            direction: Direction::Down,
            timer: 0,
            input_queue: VecDeque::new(),
            min_y: pos.y,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == PlayerState::Alive
    }

    /// Mid-jump (alive with ticks left to travel)
    pub fn is_jumping(&self) -> bool {
        self.is_alive() && self.timer > 0
    }

    /// The death or carry delay has run out
    pub fn is_game_over(&self) -> bool {
        !self.is_alive() && self.timer < 0
    }

    /// Rows gained above the start line
    pub fn score(&self) -> i32 {
        ((PLAYER_START_Y - self.min_y) / ROW_HEIGHT).floor() as i32
    }

    pub fn sprite(&self) -> SpriteId {
        player_sprite(self.state, self.timer, self.direction)
    }

    /// Try to start a jump; the input is consumed either way
    fn handle_input(&mut self, dir: Direction, rows: &[Row]) -> bool {
        let (sx, sy) = dir.step();
        let distance = JUMP_STEP * JUMP_TICKS as f32;
        let target_y = self.pos.y + sy * distance;
        let Some(row) = rows.iter().find(|row| row.y() == target_y) else {
            return false;
        };
        if !row.allow_movement(self.pos.x + sx * distance) {
            return false;
        }
        self.direction = dir;
        self.timer = JUMP_TICKS;
        true
    }

    /// Advance one tick.
    ///
    /// `pressed` holds this tick's newly pressed directions, in order.
    /// `scroll` is the world's scroll position, used to notice when the player
    /// has dropped off the bottom of the screen.
    pub fn update(
        &mut self,
        pressed: &[Direction],
        rows: &mut [Row],
        scroll: f32,
        spawner: &mut Spawner,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.input_queue.extend(pressed.iter().copied());

        if self.is_alive() {
            if self.timer == 0 {
                if let Some(dir) = self.input_queue.pop_front() {
                    if self.handle_input(dir, rows) {
                        events.push(GameEvent::Jumped(dir));
                    }
                }
            }

            if self.timer > 0 {
                let (sx, sy) = self.direction.step();
                self.pos += Vec2::new(sx, sy) * JUMP_STEP;
                self.timer -= 1;
            }

            let y = self.pos.y;
            if let Some(row) = rows.iter_mut().find(|row| row.y() == y) {
                let outcome = row.check_collision(self.pos.x);
                self.state = outcome.state;
                match outcome.state {
                    PlayerState::Alive => self.pos.x += row.push(),
                    PlayerState::Crushed => {
                        let decal = Entity::new(
                            spawner.next_entity_id(),
                            SpriteId::Splat(self.direction),
                            Vec2::new(self.pos.x, outcome.decal_offset),
                        );
                        // Front of the list, so traffic drives over it
                        row.children_mut().insert(0, decal);
                        self.timer = DEATH_TICKS;
                        log::info!("player crushed at ({}, {})", self.pos.x, y);
                        events.push(GameEvent::Crushed { x: self.pos.x, y });
                    }
                    PlayerState::Drowned => {
                        self.timer = DEATH_TICKS;
                        log::info!("player drowned at ({}, {})", self.pos.x, y);
                        events.push(GameEvent::Drowned { x: self.pos.x, y });
                    }
                    PlayerState::Carried => {
                        self.timer = CARRIED_TICKS;
                    }
                }
            } else if y > scroll + HEIGHT + 2.0 * ROW_HEIGHT {
                self.state = PlayerState::Carried;
                self.timer = CARRIED_TICKS;
                log::info!("player fell behind the screen at x={}", self.pos.x);
                events.push(GameEvent::Carried { x: self.pos.x });
            }

            self.pos.x = self.pos.x.clamp(EDGE_MARGIN, WIDTH - EDGE_MARGIN);
        } else {
            self.timer -= 1;
        }

        self.min_y = self.min_y.min(self.pos.y);
        events
    }

    pub fn draw(&self, offset: Vec2, sink: &mut dyn SpriteSink) {
        sink.draw_sprite(self.sprite(), self.pos + offset, Anchor::BottomCenter);
    }
}
