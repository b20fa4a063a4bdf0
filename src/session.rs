//! Game session: the fixed-rate frame loop
//!
//! Each frame polls input, advances the simulation one tick, stages and
//! presents a frame, then sleeps out the rest of the frame interval.

use std::io;
use std::ops::{Deref, DerefMut};
use std::time::Instant;

use crate::platform::{Input, InputEvent, Key};
use crate::renderer::{Presentation, draw_scene};
use crate::sim::{GameState, tick};

/// Failures that end a running session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("presentation surface failed: {0}")]
    Surface(#[from] io::Error),

    #[error("input source failed: {0}")]
    Input(#[source] io::Error),
}

/// An open presentation surface, closed when dropped
struct Surface<'a, P: Presentation> {
    inner: &'a mut P,
}

impl<'a, P: Presentation> Surface<'a, P> {
    fn open(inner: &'a mut P, width: u32, height: u32) -> io::Result<Self> {
        inner.open(width, height)?;
        Ok(Self { inner })
    }
}

impl<P: Presentation> Deref for Surface<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.inner
    }
}

impl<P: Presentation> DerefMut for Surface<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.inner
    }
}

impl<P: Presentation> Drop for Surface<'_, P> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.close() {
            log::warn!("Failed to close presentation surface: {e}");
        }
    }
}

/// A single game: state plus the surface and input it runs on
pub struct GameSession<P: Presentation, I: Input> {
    state: GameState,
    presentation: P,
    input: I,
    running: bool,
    frames: u64,
}

impl<P: Presentation, I: Input> GameSession<P, I> {
    pub fn new(state: GameState, presentation: P, input: I) -> Self {
        Self {
            state,
            presentation,
            input,
            running: false,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames completed by [`run`](Self::run)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_parts(self) -> (GameState, P, I) {
        (self.state, self.presentation, self.input)
    }

    /// Run until a quit event or Escape. The surface is closed on every exit
    /// path, errors included.
    pub fn run(&mut self) -> Result<(), SessionError> {
        let config = &self.state.config;
        let interval = config.frame_interval();
        let mut surface = Surface::open(
            &mut self.presentation,
            config.screen_width as u32,
            config.screen_height as u32,
        )?;

        log::info!(
            "Session started: {} blocks, {} lives",
            self.state.blocks.len(),
            self.state.lives
        );

        self.running = true;
        while self.running {
            let frame_start = Instant::now();

            for event in self.input.poll_events().map_err(SessionError::Input)? {
                match event {
                    InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => self.running = false,
                    InputEvent::KeyDown(_) => {}
                }
            }

            let held = self.input.held_keys();
            tick(&mut self.state, &held.tick_input());

            draw_scene(&self.state, &mut *surface);
            surface.present()?;
            self.frames += 1;

            let elapsed = frame_start.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }

        log::info!(
            "Session ended after {} frames: score {}, lives {}, {:?}",
            self.frames,
            self.state.score,
            self.state.lives,
            self.state.end
        );
        Ok(())
    }
}
