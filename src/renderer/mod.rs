//! Rendering and UI sinks
//!
//! The game loop hands a [`Frame`] to a [`Presenter`] once per host frame.
//! Presenters only read state; nothing here feeds back into the simulation.

pub mod text;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, set_hidden};
pub use text::TextRenderer;

use crate::highscores::HighScores;
use crate::sim::GameState;

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    /// FPS readout, `None` when hidden
    pub fps: Option<u32>,
}

/// Output side of the game: drawing plus the few UI signals the loop raises
pub trait Presenter {
    /// Draw the current state. Called every host frame, advanced or not.
    fn draw(&mut self, frame: &Frame<'_>);

    /// Show the name-entry controls. Raised once, when the run ends.
    fn reveal_name_entry(&mut self) {}

    /// Tell the player something went wrong with their request
    fn notify(&mut self, message: &str) {
        log::warn!("{message}");
    }

    /// Display the leaderboard alongside the score just achieved
    fn show_high_scores(&mut self, _scores: &HighScores, _score: u32) {}
}
