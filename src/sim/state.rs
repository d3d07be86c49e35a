//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Playing,
    /// Ball got past the paddle. Terminal for this run.
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Brick at (column, row) was destroyed
    BrickDestroyed { column: usize, row: usize },
    /// Ball reflected off a side or the top wall
    WallBounce,
    /// Ball reflected off the paddle
    PaddleBounce,
    /// Ball passed the paddle
    BallLost,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(-BALL_SPEED, -BALL_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Position after one more tick at the current velocity
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units moved per tick while a direction is held
    pub sensitivity: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            sensitivity: PADDLE_SENSITIVITY,
        }
    }
}

impl Paddle {
    /// Largest x the paddle may start a rightward step from
    pub fn max_x(&self) -> f32 {
        FIELD_WIDTH - self.width
    }

    /// Whether `x` lies strictly inside the paddle's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }
}

/// Brick status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickStatus {
    #[default]
    Active,
    Destroyed,
}

/// A single brick cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub status: BrickStatus,
    /// Sprite index into the brick sheet; cosmetic only
    pub variant: u8,
}

impl Brick {
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Fixed grid of bricks, indexed `[column][row]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: [[Brick; BRICK_ROWS]; BRICK_COLUMNS],
}

impl BrickGrid {
    /// Build a full grid with random sprite variants
    pub fn new(rng: &mut Pcg32) -> Self {
        let columns = std::array::from_fn(|column| {
            std::array::from_fn(|row| Brick {
                pos: Self::cell_origin(column, row),
                status: BrickStatus::Active,
                variant: rng.random_range(0..BRICK_VARIANTS),
            })
        });
        Self { columns }
    }

    /// Top-left corner of the cell at (column, row)
    pub fn cell_origin(column: usize, row: usize) -> Vec2 {
        Vec2::new(
            column as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
            row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
        )
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        self.columns.get_mut(column).and_then(|c| c.get_mut(row))
    }

    /// Iterate bricks in column-major order with their (column, row)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        self.columns.iter().enumerate().flat_map(|(column, bricks)| {
            bricks
                .iter()
                .enumerate()
                .map(move |(row, brick)| (column, row, brick))
        })
    }

    pub fn active_count(&self) -> usize {
        self.iter().filter(|(_, _, b)| b.is_active()).count()
    }

    pub fn destroyed_count(&self) -> usize {
        BRICK_COUNT - self.active_count()
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// One point per destroyed brick
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        Self {
            seed,
            rng_state,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: BrickGrid::new(&mut rng),
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
