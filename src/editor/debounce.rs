//! Last-write-wins debouncing against an explicit clock

use std::time::{Duration, Instant};

/// Holds at most one pending value and releases it after a quiet period
///
/// Scheduling while a value is pending replaces it and restarts the wait.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period before a value is released
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the wait from `now`
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Whether a value is waiting
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Release the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline().is_some_and(|deadline| now >= deadline);
        if due { self.cancel() } else { None }
    }
}
