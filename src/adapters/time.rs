//! Monotonic clock adapter.
//!
//! Implements [`Clock`] on top of `std::time::Instant`, anchored at
//! construction so timestamps read as uptime.

use std::time::Instant;

use crate::app::ports::Clock;
use crate::time::Timestamp;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock was created.
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_elapsed(self.start.elapsed())
    }
}
