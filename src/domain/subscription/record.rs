//! Subscription record entity.
//!
//! One record per identity. Records are created by an access request or an
//! administrative upsert, and only ever disappear through an explicit delete.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{Identity, Timestamp};

use super::{SubscriptionState, SubscriptionTerms};

/// A paid-subscription record keyed by identity.
///
/// # Invariants
///
/// - `end_date == payment_date + duration_days` whenever `payment_date` is set
/// - `payment_date` is absent only for a never-activated pending record,
///   in which case `duration_days == 0`
/// - `requested_at` and `updated_at` never move backwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// External identity this subscription belongs to.
    #[serde(alias = "mc_name")]
    pub identity: Identity,

    /// Day the subscription was paid for.
    #[serde(default, deserialize_with = "optional_date")]
    pub payment_date: Option<NaiveDate>,

    /// Length of the paid window in days.
    #[serde(default)]
    pub duration_days: u32,

    /// Last day of access (inclusive).
    #[serde(default, deserialize_with = "optional_date")]
    pub end_date: Option<NaiveDate>,

    /// Whether access is currently granted.
    #[serde(default)]
    pub active: bool,

    /// Whether the identity is waiting on an administrator.
    #[serde(default)]
    pub pending: bool,

    /// When access was last requested, if ever.
    #[serde(default)]
    pub requested_at: Option<Timestamp>,

    /// When any field last changed.
    pub updated_at: Timestamp,
}

impl SubscriptionRecord {
    /// Create a pending record for a first-time access request.
    pub fn pending_request(identity: Identity, now: Timestamp) -> Self {
        Self {
            identity,
            payment_date: None,
            duration_days: 0,
            end_date: None,
            active: false,
            pending: true,
            requested_at: Some(now),
            updated_at: now,
        }
    }

    /// Create a record directly from administrative terms.
    pub fn from_terms(terms: &SubscriptionTerms, now: Timestamp) -> Self {
        Self {
            identity: terms.identity().clone(),
            payment_date: Some(terms.payment_date()),
            duration_days: terms.duration_days(),
            end_date: Some(terms.end_date()),
            active: terms.active(),
            pending: false,
            requested_at: None,
            updated_at: now,
        }
    }

    /// Overwrite payment fields with administrative terms and close any
    /// open request.
    pub fn apply_terms(&mut self, terms: &SubscriptionTerms, now: Timestamp) {
        self.payment_date = Some(terms.payment_date());
        self.duration_days = terms.duration_days();
        self.end_date = Some(terms.end_date());
        self.active = terms.active();
        self.pending = false;
        self.touch(now);
    }

    /// Mark the record as waiting on an administrator again.
    pub fn reopen_request(&mut self, now: Timestamp) {
        self.pending = true;
        self.requested_at = Some(match self.requested_at {
            Some(previous) => previous.latest(now),
            None => now,
        });
        self.touch(now);
    }

    /// Returns true if the record is flagged active and its window covers `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.active && self.end_date.is_some_and(|end| end >= today)
    }

    /// Clear `active` if the window ended before `today`.
    ///
    /// Returns true if the record changed.
    pub fn expire_if_lapsed(&mut self, today: NaiveDate, now: Timestamp) -> bool {
        match self.end_date {
            Some(end) if self.active && end < today => {
                self.active = false;
                self.touch(now);
                true
            }
            _ => false,
        }
    }

    /// Derive the lifecycle state as of `today`.
    pub fn state(&self, today: NaiveDate) -> SubscriptionState {
        if self.is_current(today) {
            SubscriptionState::Active
        } else if self.pending {
            SubscriptionState::Pending
        } else {
            SubscriptionState::Expired
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = self.updated_at.latest(now);
    }
}

/// Reads a `YYYY-MM-DD` date, treating `null` and `""` as absent.
///
/// An unreadable date is also read as absent so one bad record cannot make
/// the whole set unreadable. Such a record is skipped by expiry and is never
/// current.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Unreadable date in stored record, treating as absent");
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    fn identity(name: &str) -> Identity {
        Identity::new(name).unwrap()
    }

    fn active_until(end: NaiveDate) -> SubscriptionRecord {
        let terms = SubscriptionTerms::new("Steve123", date(2024, 1, 1), 30, true).unwrap();
        let mut record = SubscriptionRecord::from_terms(&terms, at(2024, 1, 1));
        record.end_date = Some(end);
        record
    }

    // Construction tests

    #[test]
    fn pending_request_has_no_payment_data() {
        let record = SubscriptionRecord::pending_request(identity("Alex"), at(2024, 1, 1));

        assert!(record.pending);
        assert!(!record.active);
        assert_eq!(record.duration_days, 0);
        assert_eq!(record.payment_date, None);
        assert_eq!(record.end_date, None);
        assert_eq!(record.requested_at, Some(at(2024, 1, 1)));
    }

    #[test]
    fn apply_terms_clears_pending() {
        let mut record = SubscriptionRecord::pending_request(identity("Alex"), at(2024, 1, 1));
        let terms = SubscriptionTerms::new("Alex", date(2024, 1, 5), 10, true).unwrap();

        record.apply_terms(&terms, at(2024, 1, 5));

        assert!(!record.pending);
        assert!(record.active);
        assert_eq!(record.end_date, Some(date(2024, 1, 15)));
        assert_eq!(record.updated_at, at(2024, 1, 5));
    }

    // Timestamp monotonicity

    #[test]
    fn timestamps_never_move_backwards() {
        let mut record = SubscriptionRecord::pending_request(identity("Alex"), at(2024, 3, 1));

        record.reopen_request(at(2024, 2, 1));

        assert_eq!(record.requested_at, Some(at(2024, 3, 1)));
        assert_eq!(record.updated_at, at(2024, 3, 1));
    }

    // Expiry tests

    #[test]
    fn expires_day_after_end_date() {
        let mut record = active_until(date(2024, 1, 31));

        assert!(!record.expire_if_lapsed(date(2024, 1, 31), at(2024, 1, 31)));
        assert!(record.active);

        assert!(record.expire_if_lapsed(date(2024, 2, 1), at(2024, 2, 1)));
        assert!(!record.active);
        assert_eq!(record.updated_at, at(2024, 2, 1));
    }

    #[test]
    fn expiry_is_idempotent() {
        let mut record = active_until(date(2024, 1, 31));
        assert!(record.expire_if_lapsed(date(2024, 2, 1), at(2024, 2, 1)));
        assert!(!record.expire_if_lapsed(date(2024, 2, 1), at(2024, 2, 2)));
        assert_eq!(record.updated_at, at(2024, 2, 1));
    }

    #[test]
    fn pending_record_without_end_date_never_expires() {
        let mut record = SubscriptionRecord::pending_request(identity("Alex"), at(2024, 1, 1));
        assert!(!record.expire_if_lapsed(date(2030, 1, 1), at(2030, 1, 1)));
    }

    // State derivation

    #[test]
    fn state_follows_flags_and_date() {
        let pending = SubscriptionRecord::pending_request(identity("Alex"), at(2024, 1, 1));
        assert_eq!(pending.state(date(2024, 1, 1)), SubscriptionState::Pending);

        let active = active_until(date(2024, 1, 31));
        assert_eq!(active.state(date(2024, 1, 31)), SubscriptionState::Active);
        assert_eq!(active.state(date(2024, 2, 1)), SubscriptionState::Expired);
    }

    // Serialization

    #[test]
    fn reads_legacy_record_with_empty_dates() {
        let raw = json!({
            "mc_name": "Alex",
            "payment_date": "",
            "duration_days": 0,
            "end_date": "",
            "active": false,
            "pending": true,
            "requested_at": "2024-01-01T10:00:00",
            "updated_at": "2024-01-01T10:00:00",
            "notes": "ignored"
        });
        let record: SubscriptionRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(record.identity.as_str(), "Alex");
        assert_eq!(record.payment_date, None);
        assert_eq!(record.end_date, None);
        assert!(record.pending);
    }

    #[test]
    fn writes_canonical_field_names() {
        let record = active_until(date(2024, 1, 31));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["identity"], json!("Steve123"));
        assert_eq!(value["end_date"], json!("2024-01-31"));
        assert!(value.get("mc_name").is_none());
    }

    #[test]
    fn unreadable_dates_are_read_as_absent() {
        let raw = json!({
            "identity": "Alex",
            "payment_date": "01/01/2024",
            "duration_days": 30,
            "end_date": "31/01/2024",
            "active": true,
            "updated_at": "2024-01-01T10:00:00Z"
        });

        let mut record: SubscriptionRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(record.payment_date, None);
        assert_eq!(record.end_date, None);
        assert!(!record.is_current(date(2024, 1, 15)));
        assert!(!record.expire_if_lapsed(date(2024, 3, 1), at(2024, 3, 1)));
        assert!(record.active);
    }
}
