//! Consecutive-failure accounting for the current range window.

/// Attempt counter for one range window.
///
/// `current()` is the 1-based number of the attempt about to be made. Every failed
/// attempt bumps it; a successful chunk resets it to 1. The budget is spent once
/// `max` consecutive attempts have failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptCounter {
    count: u32,
    max: u32,
}

impl AttemptCounter {
    /// `max` is clamped to at least 1.
    pub fn new(max: u32) -> Self {
        Self {
            count: 1,
            max: max.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Record a failed attempt; returns the number of the next attempt.
    pub fn record_failure(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 1;
    }

    pub fn exhausted(&self) -> bool {
        self.count > self.max
    }
}
