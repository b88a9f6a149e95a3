//! Lane Hopper headless runner
//!
//! Drives the app for a fixed number of frames, either with the autopilot
//! playing or idling in attract mode, and prints a JSON report.
//! Usage: `lane-hopper [settings.json]`

use std::path::PathBuf;

use lane_hopper::input::autopilot;
use lane_hopper::sim::{DrawCommand, TickInput};
use lane_hopper::{App, AppState, Settings};

fn main() {
    let path = std::env::args().nth(1).map(PathBuf::from);
    let loaded = path.as_deref().map(Settings::from_path);
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };
    #[cfg(not(target_arch = "wasm32"))]
    lane_hopper::logging::init(settings.verbose);
    match (&path, &loaded) {
        (Some(path), Some(Ok(_))) => log::info!("Loaded settings from {}", path.display()),
        (_, Some(Err(e))) => log::warn!("{e}; using default settings"),
        _ => log::info!("Using default settings"),
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Lane Hopper (headless) starting, seed {seed}");

    let mut app = App::new(seed);
    let mut frame: Vec<DrawCommand> = Vec::new();
    let mut runs = 0u32;
    let mut finished = 0u32;

    for _ in 0..settings.ticks {
        let input = match app.state {
            AppState::Menu | AppState::GameOver if settings.autopilot => TickInput {
                start: true,
                ..Default::default()
            },
            AppState::Play if settings.autopilot => autopilot(&app.world),
            _ => TickInput::default(),
        };

        let before = app.state;
        app.update(&input);
        match (before, app.state) {
            (AppState::Menu, AppState::Play) => runs += 1,
            (AppState::Play, AppState::GameOver) => finished += 1,
            _ => {}
        }

        frame.clear();
        app.draw(&mut frame);
    }

    let report = serde_json::json!({
        "seed": seed,
        "ticks": settings.ticks,
        "runs": runs,
        "finished_runs": finished,
        "state": format!("{:?}", app.state),
        "score": app.world.score(),
        "rows_generated": app.world.rows_generated(),
        "sprites_last_frame": frame.len(),
        "high_scores": app.high_scores,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode report: {e}"),
    }
}
