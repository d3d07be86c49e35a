//! Brickout - A classic brick breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `platform`: Frame pacing, keyboard latch, storage backends
//! - `persistence`: Versioned save/load on top of a storage backend
//! - `game`: One iteration of the game loop, driven by the host
//! - `renderer`: Render sink trait plus text and canvas renderers

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameReport, Game, SaveScoreError};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 448.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Frame pacing (simulation advances at most once per interval)
    pub const TARGET_FPS: u32 = 60;
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / TARGET_FPS as f64;
    /// Window over which fires are counted for the FPS readout
    pub const FPS_WINDOW_MS: f64 = 1000.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 3.0;
    /// Per-axis speed, units per tick. Only the sign ever changes.
    pub const BALL_SPEED: f32 = 3.0;
    pub const BALL_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = FIELD_HEIGHT - 30.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT - 10.0;
    pub const PADDLE_START_X: f32 = (FIELD_WIDTH - PADDLE_WIDTH) / 2.0;
    /// Units moved per tick while a direction is held
    pub const PADDLE_SENSITIVITY: f32 = 8.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: usize = 13;
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COUNT: usize = BRICK_COLUMNS * BRICK_ROWS;
    pub const BRICK_WIDTH: f32 = 32.0;
    pub const BRICK_HEIGHT: f32 = 16.0;
    pub const BRICK_PADDING: f32 = 0.0;
    pub const BRICK_OFFSET_LEFT: f32 = 16.0;
    pub const BRICK_OFFSET_TOP: f32 = 80.0;
    /// Vertical extent of a brick's hit zone. Intentionally the brick width,
    /// so the zone reaches into the row below.
    pub const BRICK_HIT_HEIGHT: f32 = BRICK_WIDTH;
    /// Number of sprite variants in the brick sheet
    pub const BRICK_VARIANTS: u8 = 8;
}
