//! Brick Breaker - a grid-driven arcade brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level grid, layout, collisions, game state)
//! - `config`: Game constants and optional JSON overrides
//! - `renderer`: Presentation trait and scene composition
//! - `platform`: Input trait and the terminal backend
//! - `session`: Fixed-rate frame loop tying it all together

pub mod config;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{Color, ConfigError, GameConfig};
pub use session::{GameSession, SessionError};
pub use sim::{EndState, GameState, LevelError, LevelGrid};
