//! Idle/demo controller
//!
//! Steers the paddle so its center follows the ball. Not a perfect player:
//! the paddle's fixed speed and the coarse dead zone let it miss sometimes.

use super::state::GameState;
use super::tick::TickInput;

/// Half-width of the band around the paddle center where it holds still
const DEAD_ZONE: f32 = 6.0;

/// Choose controls for the next tick
pub fn autopilot(state: &GameState) -> TickInput {
    let paddle = &state.paddle;
    let center = paddle.x + paddle.width / 2.0;
    // Lead the target slightly in the direction of travel
    let target = state.ball.pos.x + state.ball.vel.x * 2.0;

    TickInput {
        move_left: target < center - DEAD_ZONE,
        move_right: target > center + DEAD_ZONE,
    }
}
