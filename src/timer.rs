//! Monotonic wall-clock timing for benchmark iterations.

use std::time::{Duration, Instant};

/// Measures the wall-clock duration of a single call
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start timing
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop timing and return the elapsed duration
    #[inline(always)]
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
