//! Manually controlled clock.
//!
//! Holds a single instant that only changes when told to. Used by tests to
//! pin "today" and step across expiry boundaries.

use chrono::{Duration, NaiveDate};
use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock that returns a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Create a clock frozen at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::at(noon(date))
    }

    /// Move the clock to noon UTC on `date`.
    pub fn set_date(&self, date: NaiveDate) {
        *self.guard() = noon(date);
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.guard();
        *now = Timestamp::from_datetime(*now.as_datetime() + by);
    }

    /// Move the clock forward by `days`.
    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Timestamp> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.guard()
    }
}

fn noon(date: NaiveDate) -> Timestamp {
    Timestamp::from_datetime(date.and_time(chrono::NaiveTime::MIN).and_utc() + Duration::hours(12))
}
