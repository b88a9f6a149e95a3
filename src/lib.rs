//! Lane Hopper - An endless lane-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain rows, movers, player, world scroll)
//! - `input`: Key edge detection and the autopilot
//! - `app`: Menu / play / game-over shell around a world
//! - `highscores`: In-memory leaderboard
//! - `settings`: JSON configuration for the headless runner

pub mod app;
pub mod highscores;
pub mod input;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod settings;
pub mod sim;

pub use app::{App, AppState};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 800.0;

    /// Grid unit for both axes
    pub const ROW_HEIGHT: f32 = 40.0;

    /// Horizontal band the player may stand in
    pub const EDGE_MARGIN: f32 = 16.0;

    /// Movers further than this outside the screen are swept
    pub const MOVER_OFFSCREEN_MARGIN: f32 = 70.0;

    /// Jump: 10 ticks of 4 px = one grid cell
    pub const JUMP_TICKS: i32 = 10;
    pub const JUMP_STEP: f32 = 4.0;

    /// Death animation / delay before game over (ticks)
    pub const DEATH_TICKS: i32 = 100;
    /// Delay after the eagle grabs the player (ticks)
    pub const CARRIED_TICKS: i32 = 15;

    /// Player start position
    pub const PLAYER_START_X: f32 = 240.0;
    pub const PLAYER_START_Y: f32 = -320.0;

    /// Eagle dive speed (pixels per tick)
    pub const EAGLE_SPEED: f32 = 12.0;
}
