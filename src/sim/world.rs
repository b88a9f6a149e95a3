//! World state: the active window of rows, the player and the camera
//!
//! Everything needed to reproduce a run lives here; `tick` advances it.

use glam::Vec2;

use super::entity::Entity;
use super::player::{GameEvent, Player};
use super::row::Row;
use super::sprite::{SpriteId, SpriteSink};
use super::state::Spawner;
use super::tick::{TickInput, tick};
use crate::consts::*;

/// A running level
#[derive(Debug, Clone)]
pub struct World {
    /// Active rows, bottom to top
    pub rows: Vec<Row>,
    /// Absent in attract mode
    pub player: Option<Player>,
    /// Present once the player has been carried off
    pub eagle: Option<Entity>,
    /// Camera y; decreases as the level scrolls up
    pub scroll_pos: f32,
    /// Ticks simulated
    pub frame: u64,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Seeded randomness and entity ids
    pub spawner: Spawner,
}

impl World {
    /// An attract-mode world with no player
    pub fn new(seed: u64) -> Self {
        let mut spawner = Spawner::new(seed);
        let rows = vec![Row::start(&mut spawner)];
        Self {
            rows,
            player: None,
            eagle: None,
            scroll_pos: -HEIGHT,
            frame: 0,
            events: Vec::new(),
            spawner,
        }
    }

    /// A world with a player at the start position
    pub fn with_player(seed: u64) -> Self {
        let mut world = Self::new(seed);
        world.player = Some(Player::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y)));
        world
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn update(&mut self, input: &TickInput) {
        tick(self, input);
    }

    /// Current score, if there is a player
    pub fn score(&self) -> Option<i32> {
        self.player.as_ref().map(Player::score)
    }

    /// Whether the player's death or carry delay has expired
    pub fn is_game_over(&self) -> bool {
        self.player.as_ref().is_some_and(Player::is_game_over)
    }

    /// Integer camera offset applied to everything drawn
    pub fn camera_offset(&self) -> Vec2 {
        Vec2::new(0.0, -self.scroll_pos.trunc())
    }

    /// Row at exactly this y, if generated
    pub fn row_at(&self, y: f32) -> Option<&Row> {
        self.rows.iter().find(|row| row.y() == y)
    }

    /// Total rows generated so far (including pruned ones)
    pub fn rows_generated(&self) -> u32 {
        // Rows sit at 0, -40, -80, ... so the top row's y gives the count.
        self.rows
            .last()
            .map(|row| (-row.y() / ROW_HEIGHT) as u32 + 1)
            .unwrap_or(0)
    }

    /// Emit the frame back to front.
    ///
    /// Rows and the player are ordered by the grid row they occupy; a player
    /// whose feet are partway into a row sorts with the row above, so it is
    /// drawn over the row it stands on and under the taller ones behind it.
    pub fn draw(&self, sink: &mut dyn SpriteSink) {
        enum Item<'a> {
            Row(&'a Row),
            Player(&'a Player),
        }

        let mut items: Vec<(f32, Item<'_>)> = self
            .rows
            .iter()
            .map(|row| (draw_layer(row.y()), Item::Row(row)))
            .collect();
        if let Some(player) = &self.player {
            items.push((draw_layer(player.pos.y), Item::Player(player)));
        }
        // Stable: equal layers keep rows before the player
        items.sort_by(|a, b| a.0.total_cmp(&b.0));

        let offset = self.camera_offset();
        for (_, item) in &items {
            match item {
                Item::Row(row) => row.entity.draw(offset, sink),
                Item::Player(player) => player.draw(offset, sink),
            }
        }

        if let Some(eagle) = &self.eagle {
            eagle.draw(offset, sink);
        }
    }

    pub(crate) fn spawn_eagle(&mut self, x: f32) {
        let id = self.spawner.next_entity_id();
        self.eagle = Some(Entity::new(id, SpriteId::Eagle, Vec2::new(x, self.scroll_pos)));
    }
}

/// Sort key: the grid row an object's anchor falls in, rounding up
fn draw_layer(y: f32) -> f32 {
    ((y + ROW_HEIGHT - 1.0) / ROW_HEIGHT).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::DrawCommand;

    #[test]
    fn test_new_world_starts_on_grass() {
        let world = World::new(1);
        assert_eq!(world.rows.len(), 1);
        assert_eq!(world.rows[0].y(), 0.0);
        assert_eq!(world.scroll_pos, -HEIGHT);
        assert!(world.player.is_none());
        assert_eq!(world.score(), None);
    }

    #[test]
    fn test_with_player_scores_zero() {
        let world = World::with_player(1);
        assert_eq!(world.score(), Some(0));
        assert!(!world.is_game_over());
    }

    #[test]
    fn test_draw_layer_rounds_up() {
        assert_eq!(draw_layer(0.0), 0.0);
        assert_eq!(draw_layer(-40.0), -1.0);
        assert_eq!(draw_layer(-36.0), 0.0);
        assert_eq!(draw_layer(-4.0), 0.0);
        assert_eq!(draw_layer(-41.0), -1.0);
    }

    #[test]
    fn test_draw_orders_back_to_front() {
        let mut world = World::with_player(8);
        for _ in 0..5 {
            world.update(&TickInput::default());
        }
        let mut out: Vec<DrawCommand> = Vec::new();
        world.draw(&mut out);

        // First command is the topmost row, player sits after its own row
        let rows: Vec<_> = out
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c.sprite, SpriteId::Row { .. }))
            .collect();
        let offset_y = world.camera_offset().y;
        assert_eq!(rows[0].1.pos.y, world.rows.last().unwrap().y() + offset_y);
        let player_idx = out
            .iter()
            .position(|c| matches!(c.sprite, SpriteId::Sit(_)))
            .unwrap();
        let own_row_idx = out
            .iter()
            .position(|c| {
                c.pos.y == PLAYER_START_Y + offset_y && matches!(c.sprite, SpriteId::Row { .. })
            })
            .unwrap();
        assert!(player_idx > own_row_idx);
    }

    #[test]
    fn test_draw_is_idempotent() {
        let mut world = World::with_player(8);
        for _ in 0..30 {
            world.update(&TickInput::default());
        }
        let mut first: Vec<DrawCommand> = Vec::new();
        let mut second: Vec<DrawCommand> = Vec::new();
        world.draw(&mut first);
        world.draw(&mut second);
        assert_eq!(first, second);
    }
}
