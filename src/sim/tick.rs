//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. The ball moves a fixed
//! number of units per tick, so there is no `dt`.

use super::collision::{ball_in_brick, hits_side_wall, hits_top_wall, past_bottom};
use super::state::{BrickStatus, GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left control held
    pub move_left: bool,
    /// Right control held
    pub move_right: bool,
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Continue,
    GameOver,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> StepStatus {
    if state.phase == GamePhase::GameOver {
        return StepStatus::GameOver;
    }

    state.time_ticks += 1;

    collide_bricks(state);
    let lost = move_ball(state);
    move_paddle(state, input);

    if lost {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::BallLost);
        log::info!(
            "Ball lost at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        return StepStatus::GameOver;
    }

    StepStatus::Continue
}

/// Destroy the first active brick under the ball (column-major scan)
fn collide_bricks(state: &mut GameState) {
    let ball_pos = state.ball.pos;
    let hit = state
        .bricks
        .iter()
        .find(|(_, _, brick)| brick.is_active() && ball_in_brick(ball_pos, brick))
        .map(|(column, row, _)| (column, row));

    let Some((column, row)) = hit else {
        return;
    };

    if let Some(brick) = state.bricks.get_mut(column, row) {
        brick.status = BrickStatus::Destroyed;
        state.ball.vel.y = -state.ball.vel.y;
        state.score += 1;
        state.events.push(GameEvent::BrickDestroyed { column, row });
        log::debug!("Brick ({column}, {row}) destroyed, score {}", state.score);
    }
}

/// Reflect off walls and paddle, then move. Returns true if the ball got past
/// the paddle.
fn move_ball(state: &mut GameState) -> bool {
    let ball = &mut state.ball;
    let paddle = &state.paddle;

    if hits_side_wall(ball.projected().x, ball.radius) {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }

    if hits_top_wall(ball.projected().y, ball.radius) {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    let mut lost = false;
    let next_y = ball.projected().y;
    if paddle.spans(ball.pos.x) && next_y > paddle.y {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::PaddleBounce);
    } else if past_bottom(next_y, ball.radius) || next_y > paddle.y + paddle.height {
        lost = true;
    }

    // Applied even on loss, so the final frame shows the ball one step past
    // the paddle.
    ball.pos += ball.vel;

    lost
}

/// Move the paddle for held controls. Bounds are checked before the step, so
/// the paddle may overshoot an edge by less than one step.
fn move_paddle(state: &mut GameState, input: &TickInput) {
    let paddle = &mut state.paddle;

    if input.move_right && paddle.x < paddle.max_x() {
        paddle.x += paddle.sensitivity;
    }
    if input.move_left && paddle.x > 0.0 {
        paddle.x -= paddle.sensitivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Remove every brick so tests are not disturbed by brick hits
    fn clear_bricks(state: &mut GameState) {
        for column in 0..BRICK_COLUMNS {
            for row in 0..BRICK_ROWS {
                if let Some(brick) = state.bricks.get_mut(column, row) {
                    brick.status = BrickStatus::Destroyed;
                }
            }
        }
    }

    #[test]
    fn test_ball_moves_each_tick() {
        let mut state = GameState::new(1);
        let status = tick(&mut state, &TickInput::default());
        assert_eq!(status, StepStatus::Continue);
        assert_eq!(state.ball.pos, Vec2::new(221.0, 367.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_paddle_bounce_over_paddle() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(224.0, 370.0);
        state.ball.vel = Vec2::new(BALL_SPEED, BALL_SPEED);
        state.paddle.x = 199.0;

        let mut bounced = false;
        for _ in 0..4 {
            tick(&mut state, &TickInput::default());
            if state.ball.vel.y < 0.0 {
                bounced = true;
                break;
            }
        }
        assert!(bounced, "ball should bounce off the paddle");
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::PaddleBounce));
    }

    #[test]
    fn test_paddle_bounce_on_crossing_tick() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(224.0, 379.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, BALL_SPEED);
        state.paddle.x = 199.0;

        let status = tick(&mut state, &TickInput::default());
        assert_eq!(status, StepStatus::Continue);
        assert_eq!(state.ball.vel.y, -BALL_SPEED);
        assert_eq!(state.ball.pos, Vec2::new(221.0, 376.0));
    }

    #[test]
    fn test_paddle_bounce_beats_loss() {
        // Already past the paddle's bottom edge but still within its span
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(224.0, 388.0);
        state.ball.vel = Vec2::new(BALL_SPEED, BALL_SPEED);
        state.paddle.x = 199.0;

        let status = tick(&mut state, &TickInput::default());
        assert_eq!(status, StepStatus::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.vel, Vec2::new(BALL_SPEED, -BALL_SPEED));
        assert_eq!(state.ball.pos, Vec2::new(227.0, 385.0));
        assert!(!state.events.contains(&GameEvent::BallLost));
    }

    #[test]
    fn test_ball_lost_outside_paddle() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(10.0, 397.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, BALL_SPEED);
        state.paddle.x = 300.0;

        let status = tick(&mut state, &TickInput::default());
        assert_eq!(status, StepStatus::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events.last(), Some(&GameEvent::BallLost));
        // Position still updated on the losing tick
        assert_eq!(state.ball.pos, Vec2::new(7.0, 400.0));
    }

    #[test]
    fn test_ball_lost_below_paddle_band() {
        let mut state = GameState::new(1);
        clear_bricks(&mut state);
        state.ball.pos = Vec2::new(100.0, 388.0);
        state.ball.vel = Vec2::new(BALL_SPEED, BALL_SPEED);
        state.paddle.x = 300.0;

        assert_eq!(tick(&mut state, &TickInput::default()), StepStatus::GameOver);
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(10.0, 397.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, BALL_SPEED);
        state.paddle.x = 300.0;
        tick(&mut state, &TickInput::default());
        let frozen = state.clone();

        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input), StepStatus::GameOver);
        assert_eq!(state.ball.pos, frozen.ball.pos);
        assert_eq!(state.paddle.x, frozen.paddle.x);
        assert_eq!(state.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn test_side_and_top_walls_reflect() {
        let mut state = GameState::new(1);
        clear_bricks(&mut state);
        state.ball.pos = Vec2::new(4.0, 4.0);
        state.ball.vel = Vec2::new(-BALL_SPEED, -BALL_SPEED);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(BALL_SPEED, BALL_SPEED));
        assert_eq!(state.ball.pos, Vec2::new(7.0, 7.0));
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| **e == GameEvent::WallBounce)
                .count(),
            2
        );
    }

    #[test]
    fn test_brick_hit_scores_and_reflects() {
        let mut state = GameState::new(1);
        // Inside brick (0, 0)
        state.ball.pos = Vec2::new(30.0, 90.0);
        state.ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, BALL_SPEED);
        assert_eq!(
            state.bricks.get(0, 0).map(|b| b.status),
            Some(BrickStatus::Destroyed)
        );
        assert!(
            state
                .events
                .contains(&GameEvent::BrickDestroyed { column: 0, row: 0 })
        );
    }

    #[test]
    fn test_one_brick_per_tick_when_zones_overlap() {
        let mut state = GameState::new(1);
        // y=100 is inside the zone of row 0 (80..112) and row 1 (96..128)
        state.ball.pos = Vec2::new(30.0, 100.0);
        state.ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(
            state.bricks.get(0, 0).map(|b| b.status),
            Some(BrickStatus::Destroyed)
        );
        assert_eq!(
            state.bricks.get(0, 1).map(|b| b.status),
            Some(BrickStatus::Active)
        );
        assert_eq!(state.ball.vel.y, BALL_SPEED);
    }

    #[test]
    fn test_destroyed_brick_is_ignored() {
        let mut state = GameState::new(1);
        clear_bricks(&mut state);
        state.ball.pos = Vec2::new(30.0, 90.0);
        state.ball.vel = Vec2::new(BALL_SPEED, -BALL_SPEED);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel.y, -BALL_SPEED);
    }

    #[test]
    fn test_paddle_moves_and_overshoots() {
        let mut state = GameState::new(1);
        state.paddle.x = 7.0;
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &left);
        assert_eq!(state.paddle.x, -1.0);
        tick(&mut state, &left);
        assert_eq!(state.paddle.x, -1.0);

        state.paddle.x = 391.0;
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, 399.0);
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, 399.0);
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut state = GameState::new(1);
        let both = TickInput {
            move_left: true,
            move_right: true,
        };
        tick(&mut state, &both);
        assert_eq!(state.paddle.x, PADDLE_START_X);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_right: true,
                ..Default::default()
            },
        ];
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        for input in inputs.iter().cycle().take(600) {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.bricks, state2.bricks);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right)| TickInput {
            move_left,
            move_right,
        })
    }

    proptest! {
        #[test]
        fn prop_run_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..2000),
        ) {
            let mut state = GameState::new(seed);
            let overshoot = PADDLE_SENSITIVITY - 1.0;
            let mut was_over = false;

            for input in &inputs {
                let before = state.bricks.clone();
                tick(&mut state, input);

                prop_assert_eq!(state.ball.vel.x.abs(), BALL_SPEED);
                prop_assert_eq!(state.ball.vel.y.abs(), BALL_SPEED);

                prop_assert!(state.paddle.x >= -overshoot);
                prop_assert!(state.paddle.x <= state.paddle.max_x() + overshoot);

                prop_assert_eq!(state.score as usize, state.bricks.destroyed_count());
                prop_assert!(state.bricks.destroyed_count() <= BRICK_COUNT);
                for ((_, _, old), (_, _, new)) in before.iter().zip(state.bricks.iter()) {
                    if old.status == BrickStatus::Destroyed {
                        prop_assert_eq!(new.status, BrickStatus::Destroyed);
                    }
                }

                if was_over {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
                was_over = state.is_over();
            }

            let lost = state
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::BallLost)
                .count();
            prop_assert!(lost <= 1);
        }
    }
}
