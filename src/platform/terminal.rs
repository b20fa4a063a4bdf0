//! Terminal drawing surface
//!
//! The logical screen (e.g. 800x600 pixels) is scaled onto the terminal's
//! character grid. Each frame is composed into a cell buffer, compared with
//! the previous frame, and only changed cells are written, batched with
//! `queue!` and flushed once.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute, queue};
use glam::Vec2;

use crate::config::Color;
use crate::renderer::{Presentation, TextSize};
use crate::sim::Rect;

/// Fallback when the terminal size cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Cell {
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::rgb(255, 0, 255),
        bg: Color::rgb(255, 0, 255),
        bold: true,
    };

    fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::rgb(255, 255, 255),
            bg,
            bold: false,
        }
    }
}

/// Cell buffer with logical-to-cell scaling
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    scale: Vec2,
    cells: Vec<Cell>,
}

impl CellCanvas {
    /// Canvas of `cols x rows` cells showing a logical area of `logical` pixels
    pub fn new(cols: usize, rows: usize, logical: Vec2) -> Self {
        Self {
            cols,
            rows,
            scale: Vec2::new(cols as f32 / logical.x, rows as f32 / logical.y),
            cells: vec![Cell::blank(Color::rgb(0, 0, 0)); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Cell containing a logical point, if on screen
    fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        let scaled = point * self.scale;
        if scaled.x < 0.0 || scaled.y < 0.0 {
            return None;
        }
        let (col, row) = (scaled.x as usize, scaled.y as usize);
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    /// Half-open cell span covered by `[start, end)` on one axis. Never empty
    /// for on-screen input, so thin shapes stay visible.
    fn span(start: f32, end: f32, scale: f32, limit: usize) -> (usize, usize) {
        let first = (start * scale).floor().max(0.0) as usize;
        let last = ((end * scale).ceil().max(0.0) as usize).min(limit);
        let first = first.min(limit);
        if first == last && first < limit {
            (first, first + 1)
        } else {
            (first, last)
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.cells.fill(Cell::blank(color));
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let (c0, c1) = Self::span(rect.left(), rect.right(), self.scale.x, self.cols);
        let (r0, r1) = Self::span(rect.top(), rect.bottom(), self.scale.y, self.rows);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.get_mut(col, row) {
                    *cell = Cell::blank(color);
                }
            }
        }
    }

    /// Cells whose centers fall inside the circle; at least the center cell
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let bounds = Rect::around(center, radius);
        let (c0, c1) = Self::span(bounds.left(), bounds.right(), self.scale.x, self.cols);
        let (r0, r1) = Self::span(bounds.top(), bounds.bottom(), self.scale.y, self.rows);
        for row in r0..r1 {
            for col in c0..c1 {
                let cell_center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) / self.scale;
                if cell_center.distance(center) <= radius {
                    if let Some(cell) = self.get_mut(col, row) {
                        *cell = Cell::blank(color);
                    }
                }
            }
        }
        if let Some((col, row)) = self.cell_at(center) {
            if let Some(cell) = self.get_mut(col, row) {
                *cell = Cell::blank(color);
            }
        }
    }

    /// Write text starting at the cell containing `position`, over the
    /// existing background. Clipped at the right edge.
    pub fn put_text(&mut self, text: &str, position: Vec2, bold: bool, color: Color) {
        let Some((col, row)) = self.cell_at(position) else {
            return;
        };
        for (offset, ch) in text.chars().enumerate() {
            let Some(cell) = self.get_mut(col + offset, row) else {
                break;
            };
            cell.ch = ch;
            cell.fg = color;
            cell.bold = bold;
        }
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Full-screen terminal surface (raw mode, alternate screen)
pub struct TerminalPresentation {
    writer: BufWriter<Stdout>,
    logical: Vec2,
    front: CellCanvas,
    back: CellCanvas,
    keyboard_enhanced: bool,
    open: bool,
}

impl Default for TerminalPresentation {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPresentation {
    pub fn new() -> Self {
        let logical = Vec2::ONE;
        Self {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            logical,
            front: CellCanvas::new(0, 0, logical),
            back: CellCanvas::new(0, 0, logical),
            keyboard_enhanced: false,
            open: false,
        }
    }

    fn terminal_size() -> (usize, usize) {
        let (cols, rows) = terminal::size().unwrap_or(FALLBACK_SIZE);
        (cols as usize, rows as usize)
    }

    /// Rebuild both buffers for the current terminal size. The back buffer
    /// is invalidated so the next frame repaints every cell.
    fn resize(&mut self, cols: usize, rows: usize) {
        self.front = CellCanvas::new(cols, rows, self.logical);
        self.back = CellCanvas::new(cols, rows, self.logical);
        self.back.cells.fill(Cell::INVALID);
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        // Release events make held keys exact where the terminal supports it.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.keyboard_enhanced = true;
        }
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen: Option<Cell> = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for row in 0..self.front.rows {
            for col in 0..self.front.cols {
                let index = row * self.front.cols + col;
                let cell = self.front.cells[index];
                if self.back.cells.get(index) == Some(&cell) {
                    continue;
                }

                if cursor_at != Some((col, row)) {
                    queue!(self.writer, cursor::MoveTo(col as u16, row as u16))?;
                }
                if pen.is_none_or(|p| p.fg != cell.fg) {
                    queue!(self.writer, SetForegroundColor(term_color(cell.fg)))?;
                }
                if pen.is_none_or(|p| p.bg != cell.bg) {
                    queue!(self.writer, SetBackgroundColor(term_color(cell.bg)))?;
                }
                if pen.is_none_or(|p| p.bold != cell.bold) {
                    let attribute = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(self.writer, SetAttribute(attribute))?;
                }
                queue!(self.writer, Print(cell.ch))?;

                pen = Some(cell);
                cursor_at = Some((col + 1, row));
            }
        }
        self.writer.flush()
    }
}

impl Presentation for TerminalPresentation {
    fn open(&mut self, width: u32, height: u32) -> io::Result<()> {
        self.logical = Vec2::new(width as f32, height as f32);
        let (cols, rows) = Self::terminal_size();
        self.resize(cols, rows);

        self.open = true;
        if let Err(e) = self.enter() {
            // Leave the terminal usable even when setup stops halfway.
            let _ = self.close();
            return Err(e);
        }
        log::info!("Terminal surface {cols}x{rows} cells for {width}x{height}");
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        if self.keyboard_enhanced {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        execute!(
            self.writer,
            style::ResetColor,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn fill_background(&mut self, color: Color) {
        let (cols, rows) = Self::terminal_size();
        if cols != self.front.cols || rows != self.front.rows {
            self.resize(cols, rows);
        }
        self.front.fill(color);
    }

    fn draw_rect(&mut self, rect: &Rect, color: Color) {
        self.front.fill_rect(rect, color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.front.fill_circle(center, radius, color);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: TextSize, color: Color) {
        self.front
            .put_text(text, position, size == TextSize::Large, color);
    }

    fn present(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        self.back.cells.clone_from(&self.front.cells);
        Ok(())
    }
}
