//! Menu / play / game-over shell
//!
//! Wraps a `World` in the arcade flow: an attract-mode level scrolls behind
//! the title until space is pressed, the run plays until the player's death
//! delay expires, and the game-over screen waits for space again.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScores;
use crate::sim::{Anchor, SpriteId, SpriteSink, TickInput, World};

/// Spacing between score digits
const DIGIT_SPACING: f32 = 25.0;
/// "Press space" prompt frame sequence
const START_FRAMES: [u8; 4] = [0, 1, 2, 1];
/// Width of the "press space" prompt
const START_PROMPT_WIDTH: f32 = 270.0;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Play,
    GameOver,
}

/// The whole game as the host sees it: one update and one draw per frame
#[derive(Debug, Clone)]
pub struct App {
    pub state: AppState,
    pub world: World,
    pub high_scores: HighScores,
    /// Seeds each new world
    rng: Pcg32,
}

impl App {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(rng.random());
        Self {
            state: AppState::Menu,
            world,
            high_scores: HighScores::new(),
            rng,
        }
    }

    pub fn update(&mut self, input: &TickInput) {
        match self.state {
            AppState::Menu => {
                if input.start {
                    self.world = World::with_player(self.rng.random());
                    self.state = AppState::Play;
                    log::info!("new game, seed {}", self.world.seed());
                } else {
                    self.world.update(input);
                }
            }
            AppState::Play => {
                if self.world.is_game_over() {
                    self.finish_run();
                } else {
                    self.world.update(input);
                }
            }
            AppState::GameOver => {
                if input.start {
                    self.world = World::new(self.rng.random());
                    self.state = AppState::Menu;
                }
            }
        }
    }

    fn finish_run(&mut self) {
        let score = self.world.score().unwrap_or(0).max(0) as u32;
        log::info!(
            "game over: score {} after {} ticks (seed {})",
            score,
            self.world.frame,
            self.world.seed()
        );
        self.high_scores
            .add_score(score, self.world.seed(), self.world.frame);
        self.state = AppState::GameOver;
    }

    pub fn draw(&self, sink: &mut dyn SpriteSink) {
        self.world.draw(sink);

        match self.state {
            AppState::Menu => {
                sink.draw_sprite(SpriteId::Title, Vec2::ZERO, Anchor::TopLeft);
                let phase = (self.world.scroll_pos / 6.0).floor() as i64;
                let frame = START_FRAMES[phase.rem_euclid(START_FRAMES.len() as i64) as usize];
                sink.draw_sprite(
                    SpriteId::Start(frame),
                    Vec2::new((WIDTH - START_PROMPT_WIDTH) / 2.0, HEIGHT - 240.0),
                    Anchor::TopLeft,
                );
            }
            AppState::Play => {
                let score = self.world.score().unwrap_or(0).max(0) as u32;
                let best = self.high_scores.top_score().max(score);
                display_number(sink, score, 0, 0.0, Align::Left);
                display_number(sink, best, 1, WIDTH - 10.0, Align::Right);
            }
            AppState::GameOver => {
                sink.draw_sprite(SpriteId::GameOver, Vec2::ZERO, Anchor::TopLeft);
            }
        }
    }
}

/// Which end of the number sits at `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Draw `n` as digit sprites along the top of the screen
pub fn display_number(sink: &mut dyn SpriteSink, n: u32, colour: u8, x: f32, align: Align) {
    let digits: Vec<u8> = n.to_string().bytes().map(|b| b - b'0').collect();
    let shift = match align {
        Align::Left => 0.0,
        Align::Right => digits.len() as f32,
    };
    for (i, &value) in digits.iter().enumerate() {
        let dx = (i as f32 - shift) * DIGIT_SPACING;
        sink.draw_sprite(
            SpriteId::Digit { colour, value },
            Vec2::new(x + dx, 0.0),
            Anchor::TopLeft,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DrawCommand;

    fn space() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_scrolls_until_start() {
        let mut app = App::new(5);
        for _ in 0..10 {
            app.update(&TickInput::default());
        }
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.world.scroll_pos, -HEIGHT - 10.0);

        app.update(&space());
        assert_eq!(app.state, AppState::Play);
        assert!(app.world.player.is_some());
        assert_eq!(app.world.frame, 0);
    }

    #[test]
    fn test_idle_run_ends_in_game_over_and_back_to_menu() {
        let mut app = App::new(6);
        app.update(&space());
        for _ in 0..3000 {
            app.update(&TickInput::default());
            if app.state == AppState::GameOver {
                break;
            }
        }
        assert_eq!(app.state, AppState::GameOver);
        // An idle player never climbs, so nothing to record
        assert!(app.high_scores.is_empty());

        // Frozen while showing game over
        let frame = app.world.frame;
        app.update(&TickInput::default());
        assert_eq!(app.world.frame, frame);

        app.update(&space());
        assert_eq!(app.state, AppState::Menu);
        assert!(app.world.player.is_none());
    }

    #[test]
    fn test_display_number_alignment() {
        let mut out: Vec<DrawCommand> = Vec::new();
        display_number(&mut out, 407, 1, 470.0, Align::Right);
        let names: Vec<String> = out.iter().map(|c| c.sprite.to_string()).collect();
        assert_eq!(names, vec!["digit14", "digit10", "digit17"]);
        assert_eq!(out[0].pos.x, 470.0 - 75.0);
        assert_eq!(out[2].pos.x, 470.0 - 25.0);

        out.clear();
        display_number(&mut out, 12, 0, 0.0, Align::Left);
        assert_eq!(out[0].pos.x, 0.0);
        assert_eq!(out[1].pos.x, 25.0);
    }

    #[test]
    fn test_overlays_per_state() {
        let mut app = App::new(9);
        let mut out: Vec<DrawCommand> = Vec::new();
        app.draw(&mut out);
        assert!(out.iter().any(|c| c.sprite == SpriteId::Title));
        assert!(out.iter().any(|c| matches!(c.sprite, SpriteId::Start(_))));

        app.update(&space());
        out.clear();
        app.draw(&mut out);
        let digits = out
            .iter()
            .filter(|c| matches!(c.sprite, SpriteId::Digit { .. }))
            .count();
        assert_eq!(digits, 2);
        assert!(!out.iter().any(|c| c.sprite == SpriteId::Title));
    }
}
