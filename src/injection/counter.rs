//! Counter driving the "each third call succeeds" endpoints.

use std::sync::atomic::{AtomicU64, Ordering};

/// Every `PERIOD`-th counter value is a success turn.
pub const PERIOD: u64 = 3;

/// Per-server-instance counter. Increments are atomic, so every request sees
/// its own post-increment value even under concurrent load.
#[derive(Debug, Default)]
pub struct AlternatingCounter {
    value: AtomicU64,
}

impl AlternatingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    pub fn load(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.value.store(0, Ordering::Release);
    }

    /// Adds `step` and returns the value after the increment.
    pub fn advance(&self, step: u64) -> u64 {
        self.value
            .fetch_add(step, Ordering::AcqRel)
            .wrapping_add(step)
    }

    /// Whether a post-increment value is a success turn.
    pub fn is_success_turn(value: u64) -> bool {
        value % PERIOD == 0
    }
}
