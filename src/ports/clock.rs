//! Clock port - the source of "today" for expiry decisions.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Supplies the current time.
///
/// Injected everywhere expiry is evaluated so tests can pin the date.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
