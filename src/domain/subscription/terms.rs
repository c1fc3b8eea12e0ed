//! Validated input for an administrative subscription upsert.

use chrono::{Days, NaiveDate};

use crate::domain::foundation::Identity;

use super::SubscriptionError;

/// Format accepted for payment dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Subscription terms that passed validation.
///
/// Holding a `SubscriptionTerms` guarantees the identity is well formed,
/// the duration is strictly positive, and `end_date` equals
/// `payment_date + duration_days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTerms {
    identity: Identity,
    payment_date: NaiveDate,
    duration_days: u32,
    end_date: NaiveDate,
    active: bool,
}

impl SubscriptionTerms {
    /// Validates typed terms.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentity` if `identity` is malformed
    /// - `InvalidDuration` if `duration_days` is not positive or the end
    ///   date would overflow the calendar
    pub fn new(
        identity: &str,
        payment_date: NaiveDate,
        duration_days: i64,
        active: bool,
    ) -> Result<Self, SubscriptionError> {
        let identity = Identity::new(identity)
            .map_err(|e| SubscriptionError::invalid_identity(identity, e))?;

        let days = u32::try_from(duration_days)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| SubscriptionError::invalid_duration(duration_days.to_string()))?;

        let end_date = payment_date
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| SubscriptionError::invalid_duration(duration_days.to_string()))?;

        Ok(Self {
            identity,
            payment_date,
            duration_days: days,
            end_date,
            active,
        })
    }

    /// Validates raw form input.
    ///
    /// Checks run in order: identity, payment date, duration. The first
    /// failure is returned.
    pub fn parse(
        identity: &str,
        payment_date: &str,
        duration_days: &str,
        active: bool,
    ) -> Result<Self, SubscriptionError> {
        if let Err(e) = Identity::new(identity) {
            return Err(SubscriptionError::invalid_identity(identity, e));
        }

        let date = NaiveDate::parse_from_str(payment_date.trim(), DATE_FORMAT)
            .map_err(|_| SubscriptionError::invalid_date(payment_date))?;

        let days = duration_days
            .trim()
            .parse::<i64>()
            .map_err(|_| SubscriptionError::invalid_duration(duration_days))?;

        Self::new(identity, date, days, active)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn active(&self) -> bool {
        self.active
    }
}
