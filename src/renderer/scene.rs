//! Scene composition: blocks, paddle, ball, HUD and end banner

use glam::Vec2;

use super::{Presentation, TextSize};
use crate::sim::GameState;

/// Stage one frame of `state` on `surface`
pub fn draw_scene<P: Presentation + ?Sized>(state: &GameState, surface: &mut P) {
    let config = &state.config;

    surface.fill_background(config.background_color);

    for block in &state.blocks {
        surface.draw_rect(&block.rect, block.color);
    }

    surface.draw_rect(&state.paddle.rect, config.paddle_color);

    // Whole pixels, like the HUD
    surface.draw_circle(state.ball.pos.round(), state.ball.radius, config.ball_color);

    surface.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(20.0, 20.0),
        TextSize::Normal,
        config.text_color,
    );
    surface.draw_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(config.screen_width - 120.0, 20.0),
        TextSize::Normal,
        config.text_color,
    );

    if let Some(message) = state.end.message() {
        let position = Vec2::new(
            (config.screen_width / 2.0).floor() - 80.0,
            (config.screen_height / 2.0).floor(),
        );
        surface.draw_text(message, position, TextSize::Large, config.text_color);
    }
}
