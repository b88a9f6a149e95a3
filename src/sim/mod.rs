//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only, threaded through a `Spawner`
//! - Stable iteration order (rows bottom to top, children in insertion order)
//! - No rendering or platform dependencies; drawing goes through `SpriteSink`

pub mod collision;
pub mod entity;
pub mod player;
pub mod row;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionResult, collide, collide_mover};
pub use entity::{Entity, Mover, MoverKind};
pub use player::{GameEvent, Player};
pub use row::{Row, RowKind};
pub use sprite::{Anchor, DrawCommand, SpriteId, SpriteSink, player_sprite};
pub use state::{Direction, EntityId, PlayerState, Spawner};
pub use tick::{TickInput, tick};
pub use world::World;
