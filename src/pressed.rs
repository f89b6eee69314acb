//! Pressed-key tracking across asynchronous keydown/keyup delivery
//!
//! One instance is shared per running application (the engine owns it).
//! The rules here exist because browsers do not reliably deliver keyup:
//! macOS silently swallows keyup for non-modifier keys while meta is held,
//! and focus loss or a context menu can eat keyup entirely.

use std::collections::HashSet;

use crate::normalize::{is_modifier_token, normalize};
use crate::parse::DEFAULT_DELIMITER;

/// Set of canonical key tokens currently physically down
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    down: HashSet<String>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press
    ///
    /// While meta is held, keyup for non-modifier keys never arrives on
    /// macOS, so any non-modifier tokens still tracked at the next keydown
    /// are stale and get purged first.
    pub fn press(&mut self, token: &str) {
        if self.down.contains("meta") {
            self.down.retain(|key| is_modifier_token(key));
        }
        self.down.insert(token.to_string());
    }

    /// Record a key release
    ///
    /// Meta-up is the only reliable signal that previously-stuck keys are
    /// actually up, so releasing meta clears the whole set.
    pub fn release(&mut self, token: &str) {
        if token == "meta" {
            self.down.clear();
        } else {
            self.down.remove(token);
        }
    }

    /// Check whether every key in the query is currently down
    ///
    /// The query is split on `,` and each token normalized, so
    /// `is_pressed("meta,b")` and `is_pressed("Meta")` both work.
    pub fn is_pressed(&self, query: &str) -> bool {
        self.is_pressed_with_delimiter(query, DEFAULT_DELIMITER)
    }

    /// [`Self::is_pressed`] with a custom delimiter
    pub fn is_pressed_with_delimiter(&self, query: &str, delimiter: char) -> bool {
        query
            .split(delimiter)
            .all(|token| self.down.contains(&normalize(token)))
    }

    /// Check whether every canonical token in the slice is currently down
    pub fn all_pressed(&self, tokens: &[String]) -> bool {
        tokens.iter().all(|token| self.down.contains(token))
    }

    /// Forget everything (window blur, context menu, meta release)
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut pressed = PressedKeys::new();
        pressed.press("a");
        assert!(pressed.is_pressed("a"));

        pressed.release("a");
        assert!(!pressed.is_pressed("a"));
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_query_normalizes_tokens() {
        let mut pressed = PressedKeys::new();
        pressed.press("a");
        assert!(pressed.is_pressed("A"));
        assert!(pressed.is_pressed(" a "));
    }

    #[test]
    fn test_meta_press_purges_stale_non_modifiers() {
        let mut pressed = PressedKeys::new();
        pressed.press("a");
        pressed.press("meta");
        pressed.press("b");

        // "a" was held before meta went down; its keyup will never arrive.
        assert!(!pressed.is_pressed("a"));
        assert!(pressed.is_pressed("meta,b"));
    }

    #[test]
    fn test_meta_press_keeps_modifiers() {
        let mut pressed = PressedKeys::new();
        pressed.press("shift");
        pressed.press("meta");
        pressed.press("s");

        assert!(pressed.is_pressed("shift"));
        assert!(pressed.is_pressed("meta,s"));
    }

    #[test]
    fn test_meta_release_clears_everything() {
        let mut pressed = PressedKeys::new();
        pressed.press("meta");
        pressed.press("b");
        pressed.press("shift");

        pressed.release("meta");
        assert!(pressed.is_empty());
    }

    #[test]
    fn test_multi_token_query_requires_all() {
        let mut pressed = PressedKeys::new();
        pressed.press("ctrl");
        pressed.press("a");

        assert!(pressed.is_pressed("ctrl,a"));
        assert!(!pressed.is_pressed("ctrl,b"));
    }

    #[test]
    fn test_all_pressed() {
        let mut pressed = PressedKeys::new();
        pressed.press("a");
        pressed.press("b");

        let chord = vec!["a".to_string(), "b".to_string()];
        assert!(pressed.all_pressed(&chord));

        pressed.release("b");
        assert!(!pressed.all_pressed(&chord));
    }

    #[test]
    fn test_clear() {
        let mut pressed = PressedKeys::new();
        pressed.press("a");
        pressed.press("ctrl");
        pressed.clear();
        assert!(pressed.is_empty());
    }
}
