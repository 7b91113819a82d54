//! Wall-clock sources for the task store.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime};

/// Supplies the current local wall-clock instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually driven clock, used by tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
