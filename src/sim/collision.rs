//! Player versus row-contents collision
//!
//! Rows are one-dimensional for collision purposes: the player is a point on
//! the row's X axis and each child covers a horizontal span.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::state::PlayerState;

/// Outcome of landing on (or standing on) a row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResult {
    /// State the player should be in after this check
    pub state: PlayerState,
    /// Y offset for a decal left behind, relative to the row
    pub decal_offset: f32,
}

impl CollisionResult {
    pub fn safe() -> Self {
        Self {
            state: PlayerState::Alive,
            decal_offset: 0.0,
        }
    }

    pub fn fatal(state: PlayerState) -> Self {
        Self {
            state,
            decal_offset: 0.0,
        }
    }
}

/// First child (in child order) whose span, grown by `margin`, contains `x`.
///
/// A negative margin shrinks the spans, demanding more overlap.
pub fn collide(children: &[Entity], x: f32, margin: f32) -> Option<&Entity> {
    children.iter().find(|child| child.spans(x, margin))
}

/// Like [`collide`], restricted to movers (decals never block or support)
pub fn collide_mover(children: &[Entity], x: f32, margin: f32) -> Option<&Entity> {
    children
        .iter()
        .find(|child| child.mover.is_some() && child.spans(x, margin))
}
