//! Sprite identifiers and the draw sink
//!
//! The host renders by asset name; `SpriteId`'s `Display` produces those names
//! (`sit0`, `splash3`, `car21`, `grass12`, ...), so no sprite name is ever
//! assembled by string concatenation in the simulation.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Direction, PlayerState};

/// Highest splash animation frame (`splash7`)
pub const SPLASH_FRAMES: u8 = 8;

/// Car colours, in asset order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarColour {
    Red,
    Blue,
    Yellow,
    Green,
}

impl CarColour {
    pub const ALL: [CarColour; 4] = [
        CarColour::Red,
        CarColour::Blue,
        CarColour::Yellow,
        CarColour::Green,
    ];

    fn index(self) -> u8 {
        match self {
            CarColour::Red => 0,
            CarColour::Blue => 1,
            CarColour::Yellow => 2,
            CarColour::Green => 3,
        }
    }
}

/// Log lengths, in asset order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogSize {
    Long,
    Short,
}

impl LogSize {
    pub const ALL: [LogSize; 2] = [LogSize::Long, LogSize::Short];
}

/// Terrain strip images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Grass,
    Dirt,
    Road,
    Water,
}

/// Where a sprite's position sits on the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    BottomCenter,
    BottomLeft,
    TopLeft,
}

/// Every image the game can ask the host to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Blank,
    Sit(Direction),
    Jump(Direction),
    /// Water splash frame, 0..SPLASH_FRAMES
    Splash(u8),
    /// Squashed decal left on a road
    Splat(Direction),
    Car { colour: CarColour, facing_right: bool },
    Log(LogSize),
    Row { terrain: Terrain, index: u8 },
    Eagle,
    Digit { colour: u8, value: u8 },
    Title,
    /// "Press space" prompt animation frame
    Start(u8),
    GameOver,
}

impl SpriteId {
    /// Image width in pixels, used for horizontal hit spans
    pub fn width(self) -> f32 {
        match self {
            SpriteId::Car { .. } => 96.0,
            SpriteId::Log(LogSize::Long) => 138.0,
            SpriteId::Log(LogSize::Short) => 84.0,
            SpriteId::Splat(_) => 60.0,
            SpriteId::Sit(_) | SpriteId::Jump(_) | SpriteId::Splash(_) => 60.0,
            SpriteId::Eagle => 140.0,
            SpriteId::Row { .. } | SpriteId::Title | SpriteId::GameOver => 480.0,
            SpriteId::Start(_) => 270.0,
            SpriteId::Digit { .. } => 25.0,
            SpriteId::Blank => 0.0,
        }
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SpriteId::Blank => write!(f, "blank"),
            SpriteId::Sit(dir) => write!(f, "sit{}", dir.index()),
            SpriteId::Jump(dir) => write!(f, "jump{}", dir.index()),
            SpriteId::Splash(frame) => write!(f, "splash{frame}"),
            SpriteId::Splat(dir) => write!(f, "splat{}", dir.index()),
            SpriteId::Car {
                colour,
                facing_right,
            } => write!(f, "car{}{}", colour.index(), u8::from(facing_right)),
            SpriteId::Log(size) => write!(
                f,
                "log{}",
                match size {
                    LogSize::Long => 0,
                    LogSize::Short => 1,
                }
            ),
            SpriteId::Row { terrain, index } => {
                let base = match terrain {
                    Terrain::Grass => "grass",
                    Terrain::Dirt => "dirt",
                    Terrain::Road => "road",
                    Terrain::Water => "water",
                };
                write!(f, "{base}{index}")
            }
            SpriteId::Eagle => write!(f, "eagles"),
            SpriteId::Digit { colour, value } => write!(f, "digit{colour}{value}"),
            SpriteId::Title => write!(f, "title"),
            SpriteId::Start(frame) => write!(f, "start{frame}"),
            SpriteId::GameOver => write!(f, "gameover"),
        }
    }
}

/// Player image for a given state, timer and facing
pub fn player_sprite(state: PlayerState, timer: i32, direction: Direction) -> SpriteId {
    match state {
        PlayerState::Alive if timer > 0 => SpriteId::Jump(direction),
        PlayerState::Alive => SpriteId::Sit(direction),
        // Splash plays over the first 16 ticks of the death countdown
        PlayerState::Drowned if timer > 84 => {
            let frame = ((100 - timer) / 2).clamp(0, i32::from(SPLASH_FRAMES) - 1);
            SpriteId::Splash(frame as u8)
        }
        PlayerState::Drowned | PlayerState::Crushed | PlayerState::Carried => SpriteId::Blank,
    }
}

/// One sprite placement emitted by a draw pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub pos: Vec2,
    pub anchor: Anchor,
}

/// Host-side drawing primitive
pub trait SpriteSink {
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, anchor: Anchor);
}

impl SpriteSink for Vec<DrawCommand> {
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, anchor: Anchor) {
        self.push(DrawCommand {
            sprite,
            pos,
            anchor,
        });
    }
}
