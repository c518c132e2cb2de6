//! Test clock — deterministic `Clock` implementation for tests.

use chrono::{DateTime, Utc};
use libris_core::clock::Clock;

use crate::fixtures::date;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock stopped at midnight UTC on the given day.
    ///
    /// # Panics
    ///
    /// Panics if the date does not exist.
    #[must_use]
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self(date(year, month, day))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
