//! Terminal keyboard input
//!
//! Terminals report key presses but most never report releases. A key is
//! therefore treated as held for `hold_window` after its last press or
//! auto-repeat event, and released early when a release event does arrive
//! (terminals with the keyboard enhancement protocol).

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{HeldKeys, Input, InputEvent, Key};

/// Default hold window; comfortably longer than the usual auto-repeat interval
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Held-key emulation from press/release timestamps
#[derive(Debug, Clone)]
pub struct KeyHold {
    window: Duration,
    last_seen: HashMap<Key, Instant>,
}

impl KeyHold {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_seen: HashMap::new(),
        }
    }

    pub fn press(&mut self, key: Key, at: Instant) {
        self.last_seen.insert(key, at);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Keys pressed within the hold window before `now`
    pub fn held_at(&self, now: Instant) -> HeldKeys {
        self.last_seen
            .iter()
            .filter(|(_, seen)| now.saturating_duration_since(**seen) < self.window)
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Map a terminal key code to a game key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char('a' | 'A') => Some(Key::A),
        KeyCode::Char('d' | 'D') => Some(Key::D),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Keyboard input read from the terminal's event queue
#[derive(Debug)]
pub struct TerminalInput {
    hold: KeyHold,
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_WINDOW)
    }
}

impl TerminalInput {
    pub fn new(hold_window: Duration) -> Self {
        Self {
            hold: KeyHold::new(hold_window),
        }
    }

    /// Fold one key event into the hold state, returning the discrete event
    /// it produces, if any.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<InputEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputEvent::Quit);
        }

        let mapped = map_key(key.code)?;
        match key.kind {
            KeyEventKind::Press => {
                self.hold.press(mapped, now);
                Some(InputEvent::KeyDown(mapped))
            }
            KeyEventKind::Repeat => {
                self.hold.press(mapped, now);
                None
            }
            KeyEventKind::Release => {
                self.hold.release(mapped);
                None
            }
        }
    }
}

impl Input for TerminalInput {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = self.handle_key(key, Instant::now()) {
                    events.push(input);
                }
            }
        }
        Ok(events)
    }

    fn held_keys(&self) -> HeldKeys {
        self.hold.held_at(Instant::now())
    }
}
