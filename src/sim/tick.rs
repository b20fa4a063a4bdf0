//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the game by exactly one frame. Velocities are
//! expressed in pixels per tick, so there is no `dt`.
//!
//! Ball resolution order within a tick:
//! 1. integrate position
//! 2. side walls, then top wall
//! 3. floor (a miss ends the tick early)
//! 4. paddle
//! 5. first intersecting block only
//! 6. victory check

use super::layout::upward_velocity;
use super::state::{EndState, GameState};

/// Held directions for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    move_paddle(state, input);
    update_ball(state);
}

/// Move the paddle by `paddle_speed` in each held direction, then clamp it
/// inside the screen.
///
/// The paddle keeps responding after the game has ended; only the ball freezes.
pub fn move_paddle(state: &mut GameState, input: &TickInput) {
    let speed = state.config.paddle_speed;
    if input.left {
        state.paddle.shift(-speed);
    }
    if input.right {
        state.paddle.shift(speed);
    }
    state.paddle.clamp_within(state.config.screen_width);
}

/// Move the ball and resolve its collisions. No-op once an end state is set.
pub fn update_ball(state: &mut GameState) {
    if state.is_over() {
        return;
    }

    let width = state.config.screen_width;
    let height = state.config.screen_height;
    let speed = state.config.ball_speed;

    state.ball.pos += state.ball.vel;
    // Every check below uses the box at the integrated position, even after a
    // wall clamp has moved the ball.
    let bounds = state.ball.bounding_rect();
    let radius = state.ball.radius;

    if bounds.left() < 0.0 || bounds.right() > width {
        state.ball.vel.x = -state.ball.vel.x;
        if bounds.left() < 0.0 {
            state.ball.pos.x = radius;
        }
        if bounds.right() > width {
            state.ball.pos.x = width - radius;
        }
    }

    if bounds.top() < 0.0 {
        state.ball.vel.y = -state.ball.vel.y;
        state.ball.pos.y = radius;
    }

    if bounds.top() > height {
        state.lives = state.lives.saturating_sub(1);
        if state.lives > 0 {
            log::debug!("Ball lost, {} lives left", state.lives);
            state.reset_ball();
        } else {
            log::info!("Game over with score {}", state.score);
            state.end = EndState::GameOver;
        }
        return;
    }

    // Only a descending ball bounces, so it cannot stick inside the paddle.
    if bounds.intersects(&state.paddle.rect) && state.ball.vel.y > 0.0 {
        let paddle = &state.paddle.rect;
        let factor = (bounds.center().x - paddle.center().x) / (paddle.w / 2.0);
        state.ball.vel = upward_velocity(factor, speed);
        log::debug!("Paddle hit, deflection {factor:.2}");
    }

    if let Some(index) = state
        .blocks
        .iter()
        .position(|block| bounds.intersects(&block.rect))
    {
        let block = state.blocks.remove(index);
        state.ball.vel.y = -state.ball.vel.y;
        state.score = state.score.saturating_add(block.points);
        log::debug!(
            "Block '{}' destroyed (+{}), {} left",
            block.symbol,
            block.points,
            state.blocks.len()
        );
    }

    if state.blocks.is_empty() {
        log::info!("Victory with score {}", state.score);
        state.end = EndState::Victory;
    }
}
