//! Keyboard to intent translation
//!
//! Raw key events arrive with auto-repeat. The adapter keeps the "held" state
//! of the jump key so the simulation only ever sees one `JumpPressed` per
//! physical press.

use crate::sim::Intent;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    W,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM-style key code (`"Space"`, `"KeyW"`, `"Escape"`)
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "space" => Key::Space,
            "keyw" => Key::W,
            "escape" => Key::Escape,
            _ => Key::Other,
        }
    }

    fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::W)
    }
}

/// Edge-tracking keyboard adapter
#[derive(Debug, Clone, Default)]
pub struct KeyboardAdapter {
    jump_held: bool,
}

impl KeyboardAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    pub fn key_down(&mut self, key: Key) -> Option<Intent> {
        match key {
            Key::Space | Key::W => {
                if self.jump_held {
                    None
                } else {
                    self.jump_held = true;
                    Some(Intent::JumpPressed)
                }
            }
            Key::Escape => Some(Intent::TogglePause),
            Key::Other => None,
        }
    }

    pub fn key_up(&mut self, key: Key) -> Option<Intent> {
        if key.is_jump() && self.jump_held {
            self.jump_held = false;
            Some(Intent::JumpReleased)
        } else {
            None
        }
    }
}
