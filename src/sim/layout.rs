//! Initial entity placement
//!
//! Pure functions from configuration (and the level grid) to geometry.

use glam::Vec2;

use super::level::LevelGrid;
use super::rect::Rect;
use super::state::{Ball, Block, Paddle};
use crate::config::GameConfig;

/// Paddle centered horizontally, bottom edge `paddle_offset` above the floor
pub fn place_paddle(config: &GameConfig) -> Paddle {
    let x = config.screen_width / 2.0 - config.paddle_width / 2.0;
    let y = config.screen_height - config.paddle_offset - config.paddle_height;
    Paddle {
        rect: Rect::new(x, y, config.paddle_width, config.paddle_height),
    }
}

/// Upward velocity of magnitude `speed` with horizontal component
/// proportional to `bias`.
///
/// The raw vector `(bias * speed, -speed)` is normalized and then rescaled,
/// so every angle travels at exactly `speed`.
pub fn upward_velocity(bias: f32, speed: f32) -> Vec2 {
    Vec2::new(bias * speed, -speed).normalize() * speed
}

/// Ball resting on top of the paddle, centered on it, with the launch velocity
pub fn ball_on_paddle(paddle: &Paddle, config: &GameConfig) -> Ball {
    let radius = config.ball_radius;
    Ball {
        pos: Vec2::new(paddle.rect.center().x, paddle.rect.top() - radius),
        vel: upward_velocity(config.launch_bias, config.ball_speed),
        radius,
    }
}

/// Screen rectangle of the grid cell at `(row, col)`
pub fn block_rect(config: &GameConfig, row: usize, col: usize) -> Rect {
    let x = config.grid_origin_x + col as f32 * (config.block_width + config.block_gap);
    let y = config.grid_origin_y + row as f32 * (config.block_height + config.block_gap);
    Rect::new(x, y, config.block_width, config.block_height)
}

/// One block per grid cell whose symbol has a color, in row-major order
pub fn build_blocks(config: &GameConfig, grid: &LevelGrid) -> Vec<Block> {
    grid.cells()
        .filter_map(|(row, col, symbol)| {
            let color = *config.block_colors.get(&symbol)?;
            Some(Block {
                rect: block_rect(config, row, col),
                color,
                symbol,
                points: config.points_for(symbol),
            })
        })
        .collect()
}
