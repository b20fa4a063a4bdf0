//! Platform abstraction layer
//!
//! Input capabilities consumed by the session, plus the terminal backend the
//! binary runs on:
//! - `terminal`: crossterm drawing surface
//! - `keyboard`: crossterm key events with held-key tracking

pub mod keyboard;
pub mod terminal;

use std::io;

use crate::sim::TickInput;

pub use keyboard::TerminalInput;
pub use terminal::TerminalPresentation;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Escape,
}

impl Key {
    const ALL: [Key; 5] = [Key::Left, Key::Right, Key::A, Key::D, Key::Escape];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The surface was asked to close
    Quit,
    KeyDown(Key),
}

/// Set of keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.contains(*k))
    }

    /// Paddle directions: arrows or A/D
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.contains(Key::Left) || self.contains(Key::A),
            right: self.contains(Key::Right) || self.contains(Key::D),
        }
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut keys = Self::default();
        for key in iter {
            keys.insert(key);
        }
        keys
    }
}

/// Source of player input
pub trait Input {
    /// Drain pending events
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
    /// Keys held down right now
    fn held_keys(&self) -> HeldKeys;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_set_ops() {
        let mut keys = HeldKeys::default();
        assert!(keys.is_empty());
        keys.insert(Key::Left);
        keys.insert(Key::D);
        assert!(keys.contains(Key::Left));
        assert!(keys.contains(Key::D));
        assert!(!keys.contains(Key::Right));
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec![Key::Left, Key::D]);

        keys.remove(Key::Left);
        assert!(!keys.contains(Key::Left));
        assert!(!keys.is_empty());
    }

    #[test]
    fn test_tick_input_bindings() {
        let keys: HeldKeys = [Key::A].into_iter().collect();
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: true,
                right: false
            }
        );

        let keys: HeldKeys = [Key::Right, Key::Left].into_iter().collect();
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: true,
                right: true
            }
        );

        let keys: HeldKeys = [Key::Escape].into_iter().collect();
        assert_eq!(keys.tick_input(), TickInput::default());
    }
}
