//! Per-tick input: the set of held keys plus one-shot events
//!
//! Key names are lowercased on entry, so `"Shift"` and `"shift"` are the same
//! key. Names that no binding mentions are kept but never match anything.

use std::collections::HashSet;

use glam::Vec2;

use crate::tuning::KeyBindings;

/// Case-insensitive set of currently held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of key names
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut held = Self::new();
        for key in keys {
            held.press(key.as_ref());
        }
        held
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    pub fn is_held(&self, key: &str) -> bool {
        // Bindings are usually already lowercase; avoid allocating for them
        if key.chars().any(char::is_uppercase) {
            self.keys.contains(&key.to_lowercase())
        } else {
            self.keys.contains(key)
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HeldKeys,
    /// Pause toggle (one-shot, cleared by the driver after each tick)
    pub pause: bool,
}

impl TickInput {
    pub fn held<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: HeldKeys::from_keys(keys),
            pause: false,
        }
    }

    /// Movement direction per axis in {-1, 0, 1}; opposing keys cancel
    pub fn direction(&self, bindings: &KeyBindings) -> Vec2 {
        let axis = |neg: &str, pos: &str| -> f32 {
            match (self.keys.is_held(neg), self.keys.is_held(pos)) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        };
        Vec2::new(
            axis(&bindings.left, &bindings.right),
            axis(&bindings.up, &bindings.down),
        )
    }

    pub fn sprint_held(&self, bindings: &KeyBindings) -> bool {
        self.keys.is_held(&bindings.sprint)
    }

    pub fn fire_held(&self, bindings: &KeyBindings) -> bool {
        self.keys.is_held(&bindings.fire)
    }
}
