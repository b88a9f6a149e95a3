//! Drawable entity tree and horizontal movers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::{Anchor, CarColour, LogSize, SpriteId, SpriteSink};
use super::state::{EntityId, Spawner};

/// Kind of horizontally drifting child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoverKind {
    Vehicle,
    Log,
}

/// Constant horizontal drift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub kind: MoverKind,
    /// Pixels per tick; sign is direction
    pub dx: f32,
}

/// A node in the draw tree.
///
/// Positions are relative to the parent; a row's movers and decals are its
/// children, and are drawn in insertion order on top of the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub anchor: Anchor,
    pub sprite: SpriteId,
    pub mover: Option<Mover>,
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn new(id: EntityId, sprite: SpriteId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            anchor: Anchor::BottomCenter,
            sprite,
            mover: None,
            children: Vec::new(),
        }
    }

    /// A mover with a randomly chosen sprite variant.
    ///
    /// Panics on zero velocity: movers are only ever created with a lane speed.
    pub fn mover(spawner: &mut Spawner, kind: MoverKind, dx: f32, pos: Vec2) -> Self {
        assert!(dx != 0.0, "mover created with zero velocity");
        let sprite = match kind {
            MoverKind::Vehicle => SpriteId::Car {
                colour: spawner.pick(&CarColour::ALL),
                facing_right: dx > 0.0,
            },
            MoverKind::Log => SpriteId::Log(spawner.pick(&LogSize::ALL)),
        };
        let mut entity = Self::new(spawner.next_entity_id(), sprite, pos);
        entity.mover = Some(Mover { kind, dx });
        entity
    }

    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn is_vehicle(&self) -> bool {
        matches!(
            self.mover,
            Some(Mover {
                kind: MoverKind::Vehicle,
                ..
            })
        )
    }

    pub fn is_log(&self) -> bool {
        matches!(
            self.mover,
            Some(Mover {
                kind: MoverKind::Log,
                ..
            })
        )
    }

    /// Whether x falls inside this entity's width-centred span grown by `margin`
    pub fn spans(&self, x: f32, margin: f32) -> bool {
        self.spans_after(x, margin, 0)
    }

    /// [`Entity::spans`] as it will be after `ticks` more ticks of drift
    pub fn spans_after(&self, x: f32, margin: f32, ticks: i32) -> bool {
        let drift = self.mover.map_or(0.0, |m| m.dx * ticks as f32);
        let center = self.pos.x + drift;
        let half = self.width() / 2.0;
        x >= center - half - margin && x < center + half + margin
    }

    /// Apply drift, then update children
    pub fn update(&mut self) {
        if let Some(mover) = self.mover {
            self.pos.x += mover.dx;
        }
        for child in &mut self.children {
            child.update();
        }
    }

    /// Draw at `pos + offset`, then children relative to that point
    pub fn draw(&self, offset: Vec2, sink: &mut dyn SpriteSink) {
        let at = self.pos + offset;
        sink.draw_sprite(self.sprite, at, self.anchor);
        for child in &self.children {
            child.draw(at, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::DrawCommand;

    #[test]
    fn test_mover_drifts_each_tick() {
        let mut spawner = Spawner::new(1);
        let mut car = Entity::mover(
            &mut spawner,
            MoverKind::Vehicle,
            -3.0,
            Vec2::new(100.0, 0.0),
        );
        for _ in 0..5 {
            car.update();
        }
        assert_eq!(car.pos.x, 85.0);
        assert!(matches!(
            car.sprite,
            SpriteId::Car {
                facing_right: false,
                ..
            }
        ));
    }

    #[test]
    #[should_panic(expected = "zero velocity")]
    fn test_zero_velocity_mover_panics() {
        let mut spawner = Spawner::new(1);
        let _ = Entity::mover(&mut spawner, MoverKind::Log, 0.0, Vec2::ZERO);
    }

    #[test]
    fn test_children_draw_relative_to_parent() {
        let mut spawner = Spawner::new(1);
        let mut parent = Entity::new(
            spawner.next_entity_id(),
            SpriteId::Blank,
            Vec2::new(0.0, -40.0),
        );
        let child = Entity::new(spawner.next_entity_id(), SpriteId::Eagle, Vec2::new(30.0, 2.0));
        let mut grandchild = child.clone();
        grandchild.pos = Vec2::new(1.0, 1.0);
        parent.children.push(child);
        parent.children[0].children.push(grandchild);

        let mut out: Vec<DrawCommand> = Vec::new();
        parent.draw(Vec2::new(0.0, 800.0), &mut out);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].pos, Vec2::new(0.0, 760.0));
        assert_eq!(out[1].pos, Vec2::new(30.0, 762.0));
        assert_eq!(out[2].pos, Vec2::new(31.0, 763.0));
    }

    #[test]
    fn test_span_is_half_open() {
        let mut spawner = Spawner::new(1);
        let log = Entity {
            sprite: SpriteId::Log(LogSize::Short),
            ..Entity::mover(&mut spawner, MoverKind::Log, 1.0, Vec2::new(100.0, 0.0))
        };
        assert!(log.spans(58.0, 0.0));
        assert!(!log.spans(142.0, 0.0));
        assert!(!log.spans(59.0, -4.0));
        assert!(log.spans(62.0, -4.0));
        assert!(log.spans_after(143.0, 0.0, 2));
        assert!(!log.spans_after(58.0, 0.0, 2));
    }
}
