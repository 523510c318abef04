//! Keyboard mapping for the two walking buttons

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys bound to the advance/retreat buttons (compared case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub advance: String,
    pub retreat: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            advance: "w".to_string(),
            retreat: "s".to_string(),
        }
    }
}

impl KeyBindings {
    /// Apply a key press/release to the held-button state.
    /// Returns true if the key is bound.
    pub fn apply(&self, input: &mut TickInput, key: &str, pressed: bool) -> bool {
        if key.eq_ignore_ascii_case(&self.advance) {
            input.advance = pressed;
            true
        } else if key.eq_ignore_ascii_case(&self.retreat) {
            input.retreat = pressed;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let keys = KeyBindings::default();
        let mut input = TickInput::default();

        assert!(keys.apply(&mut input, "w", true));
        assert!(input.advance);
        assert!(keys.apply(&mut input, "w", false));
        assert!(!input.advance);
    }

    #[test]
    fn test_case_insensitive() {
        let keys = KeyBindings::default();
        let mut input = TickInput::default();

        keys.apply(&mut input, "S", true);
        assert!(input.retreat);
        keys.apply(&mut input, "s", false);
        assert!(!input.retreat);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let keys = KeyBindings::default();
        let mut input = TickInput::default();

        assert!(!keys.apply(&mut input, "ArrowUp", true));
        assert_eq!(input, TickInput::default());
    }
}
