//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout;
use super::level::LevelGrid;
use super::rect::Rect;
use crate::config::{Color, GameConfig};

/// Terminal condition of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndState {
    /// Still playing
    #[default]
    None,
    /// Every block destroyed
    Victory,
    /// No lives left
    GameOver,
}

impl EndState {
    /// Banner shown once the session has ended
    pub fn message(&self) -> Option<&'static str> {
        match self {
            EndState::None => None,
            EndState::Victory => Some("VICTORY!"),
            EndState::GameOver => Some("GAME OVER"),
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Axis-aligned box used for every collision test
    pub fn bounding_rect(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }
}

/// The player's paddle; only its x position ever changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn shift(&mut self, dx: f32) {
        self.rect.x += dx;
    }

    /// Keep the paddle fully inside `[0, width]`
    pub fn clamp_within(&mut self, width: f32) {
        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
        if self.rect.right() > width {
            self.rect.set_right(width);
        }
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub color: Color,
    /// Level character that produced this block
    pub symbol: char,
    pub points: u32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: LevelGrid,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live blocks, in grid order (row-major)
    pub blocks: Vec<Block>,
    pub score: u32,
    pub lives: u32,
    pub end: EndState,
}

impl GameState {
    /// Build a fresh session for `grid`
    pub fn new(config: GameConfig, grid: LevelGrid) -> Self {
        let paddle = layout::place_paddle(&config);
        let ball = layout::ball_on_paddle(&paddle, &config);
        let mut state = Self {
            lives: config.initial_lives,
            config,
            grid,
            paddle,
            ball,
            blocks: Vec::new(),
            score: 0,
            end: EndState::None,
        };
        state.rebuild_blocks();
        state
    }

    /// Recenter the paddle, reset score, lives and end state, and put the
    /// ball back on the paddle.
    pub fn prepare_entities(&mut self) {
        self.paddle = layout::place_paddle(&self.config);
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.end = EndState::None;
        self.reset_ball();
    }

    /// Regenerate the block collection from the current grid
    pub fn rebuild_blocks(&mut self) {
        self.blocks = layout::build_blocks(&self.config, &self.grid);
        log::debug!("Built {} blocks", self.blocks.len());
    }

    /// Swap in a new level and restart the session on it
    pub fn reload(&mut self, grid: LevelGrid) {
        self.grid = grid;
        self.prepare_entities();
        self.rebuild_blocks();
    }

    /// Put the ball on top of the paddle with the launch velocity
    pub fn reset_ball(&mut self) {
        self.ball = layout::ball_on_paddle(&self.paddle, &self.config);
    }

    /// True once Victory or GameOver has been reached
    pub fn is_over(&self) -> bool {
        self.end != EndState::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(level: &str) -> GameState {
        GameState::new(GameConfig::default(), LevelGrid::parse(level).unwrap())
    }

    #[test]
    fn test_new_state() {
        let s = state("#.#\n.@.");
        assert_eq!(s.blocks.len(), 3);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.end, EndState::None);
        assert!(!s.is_over());
        assert_eq!(s.ball.pos.x, s.paddle.rect.center().x);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut s = state("#.#\n.@.");
        s.rebuild_blocks();
        s.rebuild_blocks();
        assert_eq!(s.blocks.len(), 3);
    }

    #[test]
    fn test_reload_replaces_everything() {
        let mut s = state("#.#");
        s.score = 40;
        s.lives = 1;
        s.end = EndState::GameOver;
        s.paddle.shift(-200.0);

        s.reload(LevelGrid::parse("####\n....").unwrap());
        assert_eq!(s.blocks.len(), 4);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.end, EndState::None);
        assert_eq!(s.paddle.rect.center().x, s.config.screen_width / 2.0);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut s = state("#");
        s.paddle.shift(-1000.0);
        s.paddle.clamp_within(800.0);
        assert_eq!(s.paddle.rect.left(), 0.0);

        s.paddle.shift(5000.0);
        s.paddle.clamp_within(800.0);
        assert_eq!(s.paddle.rect.right(), 800.0);
    }

    #[test]
    fn test_end_messages() {
        assert_eq!(EndState::None.message(), None);
        assert_eq!(EndState::Victory.message(), Some("VICTORY!"));
        assert_eq!(EndState::GameOver.message(), Some("GAME OVER"));
    }

    #[test]
    fn test_state_serializes() {
        let s = state("#.#");
        let json = serde_json::to_string(&s).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.blocks, s.blocks);
        assert_eq!(back.ball, s.ball);
    }
}
