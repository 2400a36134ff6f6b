//! Held-key tracking
//!
//! Keys are tracked by `KeyboardEvent.key()` value. Each control answers to
//! the arrow key and its WASD twin.

use std::collections::HashSet;

use crate::sim::{Control, InputState};

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.pressed.insert(normalize(key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&normalize(key));
    }

    /// Drop everything (window blur would otherwise leave keys stuck)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// True when any of `keys` is held
    pub fn is_down(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.pressed.contains(&normalize(k)))
    }

    /// Whether `key` drives one of the race controls
    pub fn is_bound(key: &str) -> bool {
        let key = normalize(key);
        Control::ALL
            .iter()
            .any(|c| bindings(*c).contains(&key.as_str()))
    }
}

/// Keys bound to each control
pub fn bindings(control: Control) -> &'static [&'static str] {
    match control {
        Control::Up => &["arrowup", "w"],
        Control::Down => &["arrowdown", "s"],
        Control::Left => &["arrowleft", "a"],
        Control::Right => &["arrowright", "d"],
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

impl InputState for KeyState {
    fn is_active(&self, control: Control) -> bool {
        self.is_down(bindings(control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd_map_to_same_control() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowUp");
        assert!(keys.is_active(Control::Up));
        keys.key_up("ArrowUp");
        assert!(!keys.is_active(Control::Up));

        keys.key_down("W");
        assert!(keys.is_active(Control::Up));
        keys.key_up("w");
        assert!(!keys.is_active(Control::Up));
    }

    #[test]
    fn test_multiple_controls_held() {
        let mut keys = KeyState::new();
        keys.key_down("a");
        keys.key_down("ArrowDown");
        assert!(keys.is_active(Control::Left));
        assert!(keys.is_active(Control::Down));
        assert!(!keys.is_active(Control::Right));
        assert!(keys.any_active(&[Control::Right, Control::Down]));

        keys.release_all();
        assert!(!keys.any_active(&Control::ALL));
    }

    #[test]
    fn test_unbound_keys() {
        let mut keys = KeyState::new();
        keys.key_down("x");
        assert!(!keys.any_active(&Control::ALL));
        assert!(!KeyState::is_bound("x"));
        assert!(KeyState::is_bound("ArrowRight"));
        assert!(KeyState::is_bound("D"));
    }
}
