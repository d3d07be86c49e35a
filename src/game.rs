//! Game loop
//!
//! [`Game::frame`] is one iteration of the loop. The host (browser animation
//! frame, native loop) calls it with the current time; it paces, steps the
//! simulation when due and always draws.

use thiserror::Error;

use crate::highscores::{EntryError, HighScores};
use crate::persistence::PersistenceError;
use crate::platform::{InputLatch, Pacer, Storage};
use crate::renderer::{Frame, Presenter};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, StepStatus, TickInput, autopilot, tick};

/// Why a score could not be saved
#[derive(Debug, Error)]
pub enum SaveScoreError {
    #[error("please enter a name")]
    EmptyName,
    #[error("the game is still in progress")]
    InProgress,
    #[error("this score has already been saved")]
    AlreadySaved,
    #[error("could not store high scores: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<EntryError> for SaveScoreError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::EmptyName => SaveScoreError::EmptyName,
        }
    }
}

/// What happened during one host frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Whether the simulation advanced a tick
    pub advanced: bool,
    pub status: StepStatus,
    pub fps: u32,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    input: InputLatch,
    pacer: Pacer,
    settings: Settings,
    high_scores: HighScores,
    storage: Box<dyn Storage>,
    name_entry_raised: bool,
    score_saved: bool,
}

impl Game {
    /// Start a run. Loads the leaderboard and settings from `storage`.
    pub fn new(seed: u64, now_ms: f64, storage: Box<dyn Storage>) -> Self {
        let high_scores = HighScores::load(&*storage);
        let settings = Settings::load(&*storage);
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(seed),
            input: InputLatch::new(),
            pacer: Pacer::new(now_ms),
            settings,
            high_scores,
            storage,
            name_entry_raised: false,
            score_saved: false,
        }
    }

    /// One loop iteration
    pub fn frame(&mut self, now_ms: f64, presenter: &mut dyn Presenter) -> FrameReport {
        let pace = self.pacer.tick(now_ms);

        let mut advanced = false;
        let mut status = if self.state.is_over() {
            StepStatus::GameOver
        } else {
            StepStatus::Continue
        };
        if pace.should_advance && status == StepStatus::Continue {
            let input = self.tick_input();
            status = tick(&mut self.state, &input);
            advanced = true;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::BallLost => {
                    log::info!("Game over, final score {}", self.state.score);
                    if !self.name_entry_raised {
                        self.name_entry_raised = true;
                        presenter.reveal_name_entry();
                        presenter.show_high_scores(&self.high_scores, self.state.score);
                    }
                }
                other => log::debug!("{other:?}"),
            }
        }

        presenter.draw(&Frame {
            state: &self.state,
            fps: self.settings.show_fps.then_some(pace.fps),
        });

        FrameReport {
            advanced,
            status,
            fps: pace.fps,
        }
    }

    /// Record the finished run on the leaderboard.
    ///
    /// Only one save per run. Failures are also reported to `presenter`.
    pub fn save_score(
        &mut self,
        name: &str,
        presenter: &mut dyn Presenter,
    ) -> Result<Option<usize>, SaveScoreError> {
        let result = self.try_save_score(name);
        match &result {
            Ok(rank) => {
                log::info!("Saved score {} for {} (rank {rank:?})", self.state.score, name.trim());
                presenter.show_high_scores(&self.high_scores, self.state.score);
            }
            Err(e) => presenter.notify(&e.to_string()),
        }
        result
    }

    fn try_save_score(&mut self, name: &str) -> Result<Option<usize>, SaveScoreError> {
        if !self.state.is_over() {
            return Err(SaveScoreError::InProgress);
        }
        if self.score_saved {
            return Err(SaveScoreError::AlreadySaved);
        }

        let rank = self.high_scores.add_score(name, self.state.score)?;
        self.score_saved = true;

        self.settings.remember_player(name);
        if let Err(e) = self.settings.save(&mut *self.storage) {
            log::warn!("Could not save settings: {e}");
        }
        self.high_scores.save(&mut *self.storage)?;
        Ok(rank)
    }

    /// Throw away the current run and start a fresh one
    pub fn restart(&mut self, seed: u64, now_ms: f64) {
        self.state = GameState::new(seed);
        self.input.clear();
        self.pacer = Pacer::new(now_ms);
        self.name_entry_raised = false;
        self.score_saved = false;
        log::info!("Game restarted with seed: {seed}");
    }

    /// Forward a key-down from the host
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    /// Forward a key-up from the host
    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Release all held controls
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.settings.autopilot = !self.settings.autopilot;
        log::info!("Autopilot: {}", self.settings.autopilot);
        self.settings.autopilot
    }

    pub fn toggle_fps(&mut self) -> bool {
        self.settings.show_fps = !self.settings.show_fps;
        if let Err(e) = self.settings.save(&mut *self.storage) {
            log::warn!("Could not save settings: {e}");
        }
        self.settings.show_fps
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn score_saved(&self) -> bool {
        self.score_saved
    }

    fn tick_input(&self) -> TickInput {
        if self.settings.autopilot {
            autopilot(&self.state)
        } else {
            self.input.snapshot()
        }
    }
}
