//! Time source for the outer layers.
//!
//! The lending core never reads the clock itself; every transaction carries
//! an explicit date. HTTP handlers use a `Clock` only to fill in a date the
//! client left out.

use chrono::{DateTime, Utc};

/// Source of "now".
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// `requested` when given, otherwise the current instant.
    fn resolve(&self, requested: Option<DateTime<Utc>>) -> DateTime<Utc> {
        requested.unwrap_or_else(|| self.now())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
