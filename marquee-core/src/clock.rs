//! Injectable sources of "now".

#[cfg(any(test, feature = "test-seams"))]
use std::cell::Cell;

use chrono::Utc;

use crate::timestamp::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(&Utc::now())
    }
}

/// Hand-driven clock for deterministic tests and simulations.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

#[cfg(any(test, feature = "test-seams"))]
impl ManualClock {
    #[must_use]
    pub const fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance_ms(&self, delta: i64) {
        self.now.set(self.now.get().saturating_add_ms(delta));
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
