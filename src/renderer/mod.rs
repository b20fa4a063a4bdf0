//! Rendering module
//!
//! The simulation never draws. A frame is described through the
//! [`Presentation`] trait, implemented by whatever surface the binary runs on.

pub mod scene;

use std::io;

use glam::Vec2;

use crate::config::Color;
use crate::sim::Rect;

pub use scene::draw_scene;

/// Text size variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// A drawing surface of fixed logical dimensions.
///
/// Drawing calls only stage the frame; nothing is visible until
/// [`present`](Presentation::present).
pub trait Presentation {
    /// Create the surface
    fn open(&mut self, width: u32, height: u32) -> io::Result<()>;
    /// Release the surface
    fn close(&mut self) -> io::Result<()>;

    fn fill_background(&mut self, color: Color);
    fn draw_rect(&mut self, rect: &Rect, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, size: TextSize, color: Color);

    /// Make the staged frame visible
    fn present(&mut self) -> io::Result<()>;
}
