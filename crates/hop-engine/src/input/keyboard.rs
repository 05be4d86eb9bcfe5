//! Held-key state built from `InputQueue` key events.

use std::collections::HashMap;

use super::queue::InputQueue;

/// Which keys are held and when each was pressed (seconds on the game clock).
#[derive(Debug, Default, Clone)]
pub struct Keyboard {
    pressed_at: HashMap<u32, f64>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the pending key events. Auto-repeat `KeyDown`s for a key that
    /// is already held keep the original press time.
    pub fn handle(&mut self, input: &InputQueue, now: f64) {
        for (key_code, pressed) in input.key_events() {
            if pressed {
                self.pressed_at.entry(key_code).or_insert(now);
            } else {
                self.pressed_at.remove(&key_code);
            }
        }
    }

    pub fn is_down(&self, key_code: u32) -> bool {
        self.pressed_at.contains_key(&key_code)
    }

    /// True while the key is held and was pressed less than `secs` ago.
    pub fn down_duration(&self, key_code: u32, secs: f64, now: f64) -> bool {
        self.pressed_at
            .get(&key_code)
            .is_some_and(|&at| now - at < secs)
    }
}
