//! Trailing-edge debounce with duplicate suppression.
//!
//! One instance lives inside each pipeline task. Every edit re-arms the
//! quiet-period deadline, discarding the previous one; the pending value is
//! released only when the deadline elapses with no newer edit, and only when
//! it differs from the previously released value. There is no leading-edge
//! emission.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub(crate) struct DebouncedInput {
    window: Duration,
    deadline: Option<Instant>,
    pending: Option<String>,
    last_emitted: Option<String>,
}

impl DebouncedInput {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            pending: None,
            last_emitted: None,
        }
    }

    /// Records an edit and restarts the quiet-period timer.
    pub(crate) fn submit(&mut self, value: String) {
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Deadline the pipeline loop should sleep until, when armed.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Releases the pending value once the quiet period has elapsed.
    ///
    /// Returns `None` when the value equals the previously released one;
    /// the duplicate is consumed either way.
    pub(crate) fn take_emission(&mut self) -> Option<String> {
        self.deadline = None;
        let value = self.pending.take()?;
        if self.last_emitted.as_deref() == Some(value.as_str()) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }

    /// Drops any pending value and disarms the timer.
    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    /// Rewrites the duplicate-suppression memory after an authoritative
    /// reset, so retyping the previous query emits again.
    pub(crate) fn mark_emitted(&mut self, value: String) {
        self.last_emitted = Some(value);
    }
}
