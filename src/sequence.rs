//! Ordered key-sequence detection with a sliding timeout
//!
//! One [`SequenceState`] exists per registered sequence hotkey. Instead of
//! a platform timer handle, the window is an explicit deadline compared
//! against each event's timestamp: cancellation is dropping the deadline,
//! and nothing can fire after the owning registration is torn down.

use std::time::{Duration, Instant};

/// Mutable buffer of recently pressed keys for one sequence hotkey
#[derive(Debug, Clone, Default)]
pub struct SequenceState {
    recorded: Vec<String>,
    deadline: Option<Instant>,
}

impl SequenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one qualifying (non-modifier) keydown into the buffer
    ///
    /// An expired deadline clears the buffer before the key is recorded;
    /// every feed slides the deadline to `now + timeout`. The buffer is
    /// trimmed to the expected length and compared as a trailing slice in
    /// exact order. Returns `true` exactly when the sequence completes,
    /// which also resets the state.
    pub fn feed(
        &mut self,
        token: &str,
        now: Instant,
        timeout: Duration,
        expected: &[String],
    ) -> bool {
        if expected.is_empty() {
            return false;
        }

        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.recorded.clear();
        }
        self.deadline = Some(now + timeout);

        self.recorded.push(token.to_string());
        if self.recorded.len() > expected.len() {
            let excess = self.recorded.len() - expected.len();
            self.recorded.drain(..excess);
        }

        if self.recorded.as_slice() == expected {
            self.reset();
            return true;
        }
        false
    }

    /// Drop the buffer and cancel the pending window
    pub fn reset(&mut self) {
        self.recorded.clear();
        self.deadline = None;
    }

    /// Keys recorded so far (oldest first)
    pub fn recorded(&self) -> &[String] {
        &self.recorded
    }
}
