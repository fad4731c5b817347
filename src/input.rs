//! Input vocabulary shared by platforms and scenes

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Discrete platform events, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    /// Primary button press at playfield coordinates
    MouseDown(Vec2),
    KeyDown(Key),
}

/// Keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys_map_to_game_keys() {
        assert_eq!(Key::from_dom_key("w"), Some(Key::W));
        assert_eq!(Key::from_dom_key("S"), Some(Key::S));
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Escape));
    }

    #[test]
    fn test_unused_keys_are_ignored() {
        // Menus are mouse driven; Enter and space do nothing
        assert_eq!(Key::from_dom_key("Enter"), None);
        assert_eq!(Key::from_dom_key(" "), None);
        assert_eq!(Key::from_dom_key("a"), None);
    }
}
