//! Game configuration
//!
//! Every constant the simulation and the renderer depend on lives in one
//! immutable [`GameConfig`] value. Defaults reproduce the classic layout; an
//! optional JSON file can override any subset of fields.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Errors raised while loading or validating a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game constants (screen, paddle, ball, pacing, palette)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance between the paddle's bottom edge and the bottom of the screen
    pub paddle_offset: f32,
    /// Horizontal displacement per tick while a direction key is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance travelled per tick; the ball's speed never changes
    pub ball_speed: f32,
    /// Horizontal bias of the launch vector, in units of `ball_speed`
    pub launch_bias: f32,

    // === Session ===
    pub fps: u32,
    pub initial_lives: u32,

    // === Block grid ===
    pub block_width: f32,
    pub block_height: f32,
    pub block_gap: f32,
    pub grid_origin_x: f32,
    pub grid_origin_y: f32,
    /// Points for a block symbol without an entry in `block_points`
    pub default_block_points: u32,
    /// Symbols that produce a block, with their color
    pub block_colors: BTreeMap<char, Color>,
    pub block_points: BTreeMap<char, u32>,

    // === Colors ===
    pub background_color: Color,
    pub paddle_color: Color,
    pub ball_color: Color,
    pub text_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        let palette = [
            ('#', Color::rgb(220, 76, 70), 10),
            ('@', Color::rgb(240, 160, 60), 20),
            ('%', Color::rgb(90, 190, 110), 30),
            ('*', Color::rgb(80, 140, 230), 50),
            ('$', Color::rgb(190, 110, 220), 100),
        ];

        Self {
            screen_width: 800.0,
            screen_height: 600.0,

            paddle_width: 120.0,
            paddle_height: 18.0,
            paddle_offset: 30.0,
            paddle_speed: 8.0,

            ball_radius: 8.0,
            ball_speed: 6.0,
            launch_bias: 0.5,

            fps: 60,
            initial_lives: 3,

            block_width: 60.0,
            block_height: 24.0,
            block_gap: 4.0,
            grid_origin_x: 16.0,
            grid_origin_y: 60.0,
            default_block_points: 10,
            block_colors: palette.iter().map(|&(s, c, _)| (s, c)).collect(),
            block_points: palette.iter().map(|&(s, _, p)| (s, p)).collect(),

            background_color: Color::rgb(15, 15, 30),
            paddle_color: Color::rgb(230, 230, 230),
            ball_color: Color::rgb(255, 214, 0),
            text_color: Color::rgb(255, 255, 255),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        let finite = [
            ("paddle_offset", self.paddle_offset),
            ("paddle_speed", self.paddle_speed),
            ("launch_bias", self.launch_bias),
            ("block_gap", self.block_gap),
            ("grid_origin_x", self.grid_origin_x),
            ("grid_origin_y", self.grid_origin_y),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.paddle_width > self.screen_width {
            return Err(ConfigError::Invalid(
                "paddle_width exceeds screen_width".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".to_string()));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid(
                "initial_lives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Point value of a block symbol
    pub fn points_for(&self, symbol: char) -> u32 {
        self.block_points
            .get(&symbol)
            .copied()
            .unwrap_or(self.default_block_points)
    }

    /// Duration of one simulation tick
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}
