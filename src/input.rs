//! Keyboard edge detection and the autopilot
//!
//! The host only answers "is this key down right now"; `KeyEdges` remembers
//! the previous frame per key and turns that into per-tick presses.

use crate::consts::*;
use crate::sim::{Direction, Row, RowKind, TickInput, World};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Right,
    Down,
    Left,
    Space,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Right, Key::Down, Key::Left, Key::Space];

    fn slot(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Right => 1,
            Key::Down => 2,
            Key::Left => 3,
            Key::Space => 4,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Right => Some(Direction::Right),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Space => None,
        }
    }
}

/// Host keyboard query
pub trait Keyboard {
    fn is_key_down(&self, key: Key) -> bool;
}

impl<F> Keyboard for F
where
    F: Fn(Key) -> bool,
{
    fn is_key_down(&self, key: Key) -> bool {
        self(key)
    }
}

/// Previous-frame key state, for "just pressed" detection
#[derive(Debug, Clone, Default)]
pub struct KeyEdges {
    down: [bool; 5],
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current state of `key`; true on an up-to-down transition
    pub fn just_pressed(&mut self, key: Key, is_down: bool) -> bool {
        let slot = key.slot();
        let pressed = is_down && !self.down[slot];
        self.down[slot] = is_down;
        pressed
    }

    /// Sample every key once and build this tick's input
    pub fn poll(&mut self, keyboard: &dyn Keyboard) -> TickInput {
        let mut input = TickInput::default();
        for key in Key::ALL {
            if !self.just_pressed(key, keyboard.is_key_down(key)) {
                continue;
            }
            match key.direction() {
                Some(dir) => input.pressed.push(dir),
                None => input.start = true,
            }
        }
        input
    }
}

/// Extra clearance the autopilot wants around cars
const CAR_CLEARANCE: f32 = 12.0;
/// Footing the autopilot wants on a log (tighter than the game's)
const LOG_FOOTING: f32 = -12.0;
/// Ticks the autopilot wants to be able to linger on a road after landing
const ROAD_LINGER_TICKS: i32 = 20;

/// Whether standing at `x` on `row` is survivable from `from` ticks ahead
/// until `to` ticks ahead
fn safe_between(row: &Row, x: f32, from: i32, to: i32) -> bool {
    match row.kind {
        RowKind::Grass | RowKind::Dirt => true,
        RowKind::Road => (from..=to).all(|t| {
            !row.children()
                .iter()
                .any(|c| c.is_vehicle() && c.spans_after(x, CAR_CLEARANCE, t))
        }),
        // Once on a log the player drifts with it
        RowKind::Water => row
            .children()
            .iter()
            .any(|c| c.is_log() && c.spans_after(x, LOG_FOOTING, from)),
    }
}

/// Pick the next hop for the player, or nothing.
///
/// Hops up whenever the row above will be safe on landing; dodges sideways or
/// back when traffic is about to arrive; otherwise waits.
pub fn autopilot(world: &World) -> TickInput {
    let Some(player) = world.player.as_ref() else {
        return TickInput::default();
    };
    if !player.is_alive() || player.is_jumping() || !player.input_queue.is_empty() {
        return TickInput::default();
    }

    let (x, y) = (player.pos.x, player.pos.y);
    let distance = JUMP_STEP * JUMP_TICKS as f32;
    let lands_safely = |dir: Direction| {
        let (sx, sy) = dir.step();
        let tx = x + sx * distance;
        world.row_at(y + sy * distance).is_some_and(|row| {
            row.allow_movement(tx)
                && safe_between(row, tx, JUMP_TICKS, JUMP_TICKS + ROAD_LINGER_TICKS)
        })
    };

    if lands_safely(Direction::Up) {
        return TickInput::press(Direction::Up);
    }

    let here_in_danger = world
        .row_at(y)
        .is_some_and(|row| !safe_between(row, x, 1, JUMP_TICKS));
    // Falling behind the camera is fatal too
    let lagging = y > world.scroll_pos + HEIGHT - 2.0 * ROW_HEIGHT;
    if here_in_danger {
        let escape = [Direction::Left, Direction::Right, Direction::Down]
            .into_iter()
            .find(|&dir| lands_safely(dir));
        if let Some(dir) = escape {
            return TickInput::press(dir);
        }
    }
    if lagging {
        return TickInput::press(Direction::Up);
    }

    TickInput::default()
}
