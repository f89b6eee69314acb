//! Interactive hotkey capture for "press your shortcut" UIs
//!
//! The recorder sits in front of the engine: while recording, qualifying
//! keydowns are consumed and appended to the captured list instead of being
//! dispatched. The captured tokens are already normalized, so the joined
//! result feeds straight back into registration.

use std::collections::HashSet;

use crate::normalize::normalize;
use crate::types::{KeyEvent, KeyEventKind};

/// Captures the keys a user presses into an ordered, deduplicated list
#[derive(Debug, Clone, Default)]
pub struct HotkeyRecorder {
    keys: Vec<String>,
    recording: bool,
    use_key: bool,
    blacklist: HashSet<String>,
}

impl HotkeyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture produced characters instead of physical codes
    pub fn with_use_key(mut self, use_key: bool) -> Self {
        self.use_key = use_key;
        self
    }

    /// Keys that are never captured, compared after normalization
    pub fn with_blacklist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist = keys.into_iter().map(|k| normalize(k.as_ref())).collect();
        self
    }

    /// Begin a fresh capture, discarding any previous one
    pub fn start(&mut self) {
        self.keys.clear();
        self.recording = true;
    }

    /// Stop capturing; the captured keys stay readable
    pub fn stop(&mut self) {
        self.recording = false;
    }

    /// Clear the captured keys without changing the recording state
    pub fn reset_keys(&mut self) {
        self.keys.clear();
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Captured keys in press order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The captured keys joined into a registrable hotkey string
    pub fn as_hotkey(&self) -> String {
        self.keys.join("+")
    }

    /// Offer an event to the recorder
    ///
    /// Returns `true` when the event was consumed: only keydowns with a
    /// physical code, while recording, qualify. Repeats of an already
    /// captured key are consumed without growing the list.
    pub fn record(&mut self, event: &KeyEvent) -> bool {
        if !self.recording || event.kind != KeyEventKind::KeyDown {
            return false;
        }
        let Some(code) = event.code.as_deref() else {
            return false;
        };

        let token = if self.use_key {
            match event.key.as_deref() {
                Some(key) => key.to_lowercase(),
                None => return false,
            }
        } else {
            normalize(code)
        };

        if self.blacklist.contains(&token) {
            return false;
        }

        if !self.keys.iter().any(|k| *k == token) {
            self.keys.push(token);
        }
        true
    }
}
