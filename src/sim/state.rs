//! Shared simulation types
//!
//! Directions, life states, entity handles and the seeded generator that every
//! row and mover draws from.

use rand::distr::uniform::SampleRange;
use rand::distr::uniform::SampleUniform;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Facing / movement direction, numbered clockwise from up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Index used in sprite names (`sit0` faces up)
    pub fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Unit grid step; y grows downward
    pub fn step(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Right => (1.0, 0.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
        }
    }
}

/// Player life state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Alive,
    /// Hit by a vehicle
    Crushed,
    /// Fell in the water
    Drowned,
    /// Fell behind the bottom of the screen and was taken by the eagle
    Carried,
}

/// Stable handle for a mover, decal or eagle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Seeded randomness plus entity id allocation.
///
/// Every random draw in a world (terrain branching, mover spacing, sprite
/// variants, spawn intervals) goes through one of these, so a seed fully
/// determines a run.
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u32 {
        self.next_id - 1
    }

    /// Uniform draw from a range (inclusive or exclusive)
    pub fn range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform float in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// True with the given probability
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }

    /// Uniform pick from a non-empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        *items
            .choose(&mut self.rng)
            .expect("pick from an empty candidate list")
    }
}
