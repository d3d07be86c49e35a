//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step only (velocities are units per tick)
//! - Seeded RNG only
//! - Stable iteration order (column-major over the brick grid)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::ball_in_brick;
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, Paddle, RngState,
};
pub use tick::{StepStatus, TickInput, tick};
