//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Stable iteration order (blocks keep grid order)
//! - No rendering or platform dependencies

pub mod layout;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use layout::{ball_on_paddle, block_rect, build_blocks, place_paddle, upward_velocity};
pub use level::{LevelError, LevelGrid};
pub use rect::Rect;
pub use state::{Ball, Block, EndState, GameState, Paddle};
pub use tick::{TickInput, move_paddle, tick, update_ball};
