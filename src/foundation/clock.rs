use std::cell::Cell;
use std::time::Instant;

use crate::foundation::core::TimeMs;

/// Source of "now" in milliseconds.
///
/// Readings only need to be monotonic relative to each other; the recorder subtracts its own
/// baseline, so the absolute origin is irrelevant.
pub trait Clock {
    /// Current reading in milliseconds.
    fn now_ms(&self) -> TimeMs;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> TimeMs {
        (**self).now_ms()
    }
}

/// Wall clock for interactive sessions.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose zero is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> TimeMs {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Externally driven clock. Render drivers and tests set its reading explicitly.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Cell<TimeMs>,
}

impl VirtualClock {
    /// Create a clock reading `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading.
    pub fn set(&self, ms: TimeMs) {
        self.now.set(ms);
    }

    /// Move the reading forward by `ms`.
    pub fn advance(&self, ms: TimeMs) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> TimeMs {
        self.now.get()
    }
}
