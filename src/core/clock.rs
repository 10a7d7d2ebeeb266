//! Wall-clock abstraction.
//!
//! Deadline keywords are resolved relative to "now". Callers that need
//! deterministic output (tests, replaying ingested messages) supply a
//! [`FixedClock`]; everything else uses [`SystemClock`].

use chrono::{DateTime, Local, TimeZone};

/// Source of the current time.
pub trait Clock {
    /// Time zone whose wall clock defines "today", "tomorrow", etc.
    type Tz: TimeZone;

    /// Current instant in [`Self::Tz`].
    fn now(&self) -> DateTime<Self::Tz>;
}

/// The machine's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(DateTime<Tz>);

impl<Tz: TimeZone> FixedClock<Tz> {
    /// Freeze the clock at `now`.
    #[must_use]
    pub fn new(now: DateTime<Tz>) -> Self {
        Self(now)
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}
