//! Collision tests between the ball and the static geometry
//!
//! All tests are axis-aligned and use the ball's center point, not its radius,
//! except for the walls which are inset by the radius.

use glam::Vec2;

use super::state::Brick;
use crate::consts::{BRICK_HIT_HEIGHT, BRICK_WIDTH, FIELD_HEIGHT, FIELD_WIDTH};

/// Whether the ball center lies strictly inside a brick's hit zone
pub fn ball_in_brick(ball_pos: Vec2, brick: &Brick) -> bool {
    let same_x = ball_pos.x > brick.pos.x && ball_pos.x < brick.pos.x + BRICK_WIDTH;
    let same_y = ball_pos.y > brick.pos.y && ball_pos.y < brick.pos.y + BRICK_HIT_HEIGHT;
    same_x && same_y
}

/// Whether a projected x would leave the field horizontally
pub fn hits_side_wall(projected_x: f32, radius: f32) -> bool {
    projected_x > FIELD_WIDTH - radius || projected_x < radius
}

/// Whether a projected y would cross the top wall
pub fn hits_top_wall(projected_y: f32, radius: f32) -> bool {
    projected_y < radius
}

/// Whether a projected y is past the bottom of the field
pub fn past_bottom(projected_y: f32, radius: f32) -> bool {
    projected_y > FIELD_HEIGHT - radius
}
