//! Terrain rows and the procedural terrain grammar
//!
//! Each row kind decides four things: how it populates and respawns its
//! movers, what standing on it at a given X means, how far it pushes the
//! player, and which row comes next.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, collide, collide_mover};
use super::entity::{Entity, MoverKind};
use super::sprite::{Anchor, SpriteId, Terrain};
use super::state::{PlayerState, Spawner};
use crate::consts::*;

/// Shortest gap between the leading edges of two movers in a lane
pub const MOVER_SPACING_MIN: i32 = 240;
/// Longest gap used when a lane is first populated
pub const MOVER_SPACING_MAX: i32 = 480;

/// Road runs are capped at this index
pub const ROAD_MAX_INDEX: u8 = 5;
/// Water runs are capped at this index (eight rows)
pub const WATER_MAX_INDEX: u8 = 7;
/// Grass and dirt shoulders count up to this index
pub const SHOULDER_MAX_INDEX: u8 = 15;

/// Log hitboxes are shrunk by this much so the player needs a real foothold
const LOG_FOOTING_MARGIN: f32 = -4.0;
/// How far a log sinks while the player stands on it
const LOG_DIP: f32 = 2.0;

/// Row variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    Grass,
    Dirt,
    Road,
    Water,
}

impl RowKind {
    /// Mover type for active rows
    pub fn mover_kind(self) -> Option<MoverKind> {
        match self {
            RowKind::Road => Some(MoverKind::Vehicle),
            RowKind::Water => Some(MoverKind::Log),
            RowKind::Grass | RowKind::Dirt => None,
        }
    }

    pub fn max_index(self) -> u8 {
        match self {
            RowKind::Grass | RowKind::Dirt => SHOULDER_MAX_INDEX,
            RowKind::Road => ROAD_MAX_INDEX,
            RowKind::Water => WATER_MAX_INDEX,
        }
    }

    fn terrain(self) -> Terrain {
        match self {
            RowKind::Grass => Terrain::Grass,
            RowKind::Dirt => Terrain::Dirt,
            RowKind::Road => Terrain::Road,
            RowKind::Water => Terrain::Water,
        }
    }

    /// Lane speeds a new row may pick, given the row below
    pub fn lane_speeds(self, predecessor_dx: f32) -> Vec<f32> {
        match self {
            RowKind::Road => (-5..=5)
                .map(|dx| dx as f32)
                .filter(|&dx| dx != 0.0 && dx != predecessor_dx)
                .collect(),
            RowKind::Water => {
                // A static predecessor allows both directions.
                let mut speeds = Vec::with_capacity(4);
                if predecessor_dx >= 0.0 {
                    speeds.extend([-2.0, -1.0]);
                }
                if predecessor_dx <= 0.0 {
                    speeds.extend([1.0, 2.0]);
                }
                speeds
            }
            RowKind::Grass | RowKind::Dirt => Vec::new(),
        }
    }
}

/// One horizontal strip of terrain.
///
/// The row's entity sits at (0, y) anchored bottom-left; its children are the
/// movers and decals on the strip, positioned relative to the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub kind: RowKind,
    pub index: u8,
    /// Lane drift (0 for grass and dirt)
    pub dx: f32,
    /// Ticks until the next mover spawns
    spawn_timer: f32,
    pub entity: Entity,
}

impl Row {
    /// Build a row, choosing a lane speed and populating it for active kinds.
    ///
    /// Panics if `index` is outside the kind's range.
    pub fn new(
        kind: RowKind,
        index: u8,
        y: f32,
        predecessor_dx: f32,
        spawner: &mut Spawner,
    ) -> Self {
        assert!(
            index <= kind.max_index(),
            "{kind:?} row index {index} out of range"
        );

        let sprite = SpriteId::Row {
            terrain: kind.terrain(),
            index,
        };
        let mut entity = Entity::new(spawner.next_entity_id(), sprite, Vec2::new(0.0, y));
        entity.anchor = Anchor::BottomLeft;

        let mut row = Self {
            kind,
            index,
            dx: 0.0,
            spawn_timer: 0.0,
            entity,
        };

        if let Some(mover_kind) = kind.mover_kind() {
            row.dx = spawner.pick(&kind.lane_speeds(predecessor_dx));
            row.populate(mover_kind, spawner);
        }

        log::debug!(
            "row {:?}{} at y={} dx={} movers={}",
            kind,
            index,
            y,
            row.dx,
            row.entity.children.len()
        );
        row
    }

    /// The first row of every world
    pub fn start(spawner: &mut Spawner) -> Self {
        Self::new(RowKind::Grass, 0, 0.0, 0.0, spawner)
    }

    pub fn y(&self) -> f32 {
        self.entity.pos.y
    }

    pub fn children(&self) -> &[Entity] {
        &self.entity.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Entity> {
        &mut self.entity.children
    }

    /// Walk across the lane placing movers at random spacing so a new row
    /// starts out looking like it has been running for a while
    fn populate(&mut self, mover_kind: MoverKind, spawner: &mut Spawner) {
        let half = WIDTH / 2.0;
        let mut x = -half - MOVER_OFFSCREEN_MARGIN;
        while x < half + MOVER_OFFSCREEN_MARGIN {
            x += spawner.range::<i32, _>(MOVER_SPACING_MIN..=MOVER_SPACING_MAX) as f32;
            let px = if self.dx > 0.0 { half + x } else { half - x };
            let mover = Entity::mover(spawner, mover_kind, self.dx, Vec2::new(px, 0.0));
            self.entity.children.push(mover);
        }
    }

    /// Successor row, one row height above
    pub fn next(&self, spawner: &mut Spawner) -> Row {
        let (kind, index) = match self.kind {
            RowKind::Grass | RowKind::Dirt => match self.index {
                0..=5 => (self.kind, self.index + 8),
                6 => (self.kind, 7),
                7 => (self.kind, 15),
                8..=14 => (self.kind, self.index + 1),
                _ => {
                    let hazard = spawner.pick(&[RowKind::Road, RowKind::Water]);
                    (hazard, 0)
                }
            },
            RowKind::Water => {
                if self.index >= WATER_MAX_INDEX || (self.index >= 1 && spawner.chance(0.5)) {
                    (RowKind::Dirt, spawner.range(4..=6))
                } else {
                    (RowKind::Water, self.index + 1)
                }
            }
            RowKind::Road => match self.index {
                0 => (RowKind::Road, 1),
                i if i < ROAD_MAX_INDEX => {
                    if spawner.unit() < 0.8 {
                        (RowKind::Road, i + 1)
                    } else {
                        (RowKind::Grass, spawner.range(0..=6))
                    }
                }
                _ => (RowKind::Grass, spawner.range(0..=6)),
            },
        };

        Row::new(kind, index, self.y() - ROW_HEIGHT, self.dx, spawner)
    }

    /// What standing at `x` on this row does to the player
    pub fn check_collision(&self, x: f32) -> CollisionResult {
        match self.kind {
            RowKind::Grass | RowKind::Dirt => CollisionResult::safe(),
            RowKind::Road => {
                if collide_mover(self.children(), x, 0.0).is_some_and(Entity::is_vehicle) {
                    CollisionResult::fatal(PlayerState::Crushed)
                } else {
                    CollisionResult::safe()
                }
            }
            RowKind::Water => {
                if collide_mover(self.children(), x, LOG_FOOTING_MARGIN).is_some() {
                    CollisionResult::safe()
                } else {
                    CollisionResult::fatal(PlayerState::Drowned)
                }
            }
        }
    }

    /// Whether the player may land at `x` on this row
    pub fn allow_movement(&self, x: f32) -> bool {
        (EDGE_MARGIN..=WIDTH - EDGE_MARGIN).contains(&x)
    }

    /// Horizontal conveyance applied to a player standing on the row
    pub fn push(&self) -> f32 {
        match self.kind {
            RowKind::Water => self.dx,
            RowKind::Grass | RowKind::Dirt | RowKind::Road => 0.0,
        }
    }

    /// First child (movers and decals alike) covering `x`
    pub fn collide(&self, x: f32, margin: f32) -> Option<&Entity> {
        collide(self.children(), x, margin)
    }

    /// Advance movers, sweep the ones that left the screen and spawn new ones.
    ///
    /// `player` is the player's position, used to sink the log underfoot.
    pub fn update(&mut self, spawner: &mut Spawner, player: Option<Vec2>) {
        self.entity.update();

        let Some(mover_kind) = self.kind.mover_kind() else {
            return;
        };

        // Decals have no mover and are never swept.
        let lo = -MOVER_OFFSCREEN_MARGIN;
        let hi = WIDTH + MOVER_OFFSCREEN_MARGIN;
        self.entity
            .children
            .retain(|child| child.mover.is_none() || (child.pos.x > lo && child.pos.x < hi));

        self.spawn_timer -= 1.0;
        if self.spawn_timer < 0.0 {
            let x = if self.dx < 0.0 { hi } else { lo };
            let mover = Entity::mover(spawner, mover_kind, self.dx, Vec2::new(x, 0.0));
            log::trace!("spawn {:?} {:?} at x={} y={}", mover_kind, mover.id, x, self.y());
            self.entity.children.push(mover);
            // Faster lanes spawn more often, keeping density roughly constant.
            self.spawn_timer =
                (1.0 + spawner.unit()) * (MOVER_SPACING_MIN as f32 / self.dx.abs());
        }

        if self.kind == RowKind::Water {
            let underfoot = player
                .filter(|p| p.y == self.y())
                .and_then(|p| collide_mover(self.children(), p.x, LOG_FOOTING_MARGIN))
                .map(|log| log.id);
            for log in &mut self.entity.children {
                log.pos.y = if Some(log.id) == underfoot { LOG_DIP } else { 0.0 };
            }
        }
    }
}
