//! Subscription lifecycle decisions.
//!
//! Pure functions over a loaded `SubscriptionSet`. They never touch storage:
//! callers load the set, apply one decision, persist the set if it changed,
//! and append the returned audit event.

use chrono::NaiveDate;

use crate::domain::audit::{AuditAction, AuditEvent};
use crate::domain::foundation::{Identity, StateMachine, Timestamp};

use super::{SubscriptionError, SubscriptionRecord, SubscriptionSet, SubscriptionState, SubscriptionTerms};

/// Result of applying one lifecycle decision to a record set.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    /// Operation-specific outcome.
    pub outcome: T,
    /// State of the identity before the decision.
    pub from: SubscriptionState,
    /// State of the identity after the decision.
    pub to: SubscriptionState,
    /// Audit event to append; `None` means the set was not mutated.
    pub audit: Option<AuditEvent>,
}

impl<T> Transition<T> {
    fn new(outcome: T, from: SubscriptionState, to: SubscriptionState, audit: Option<AuditEvent>) -> Self {
        debug_assert!(
            from.can_transition_to(&to),
            "lifecycle produced invalid transition {:?} -> {:?}",
            from,
            to
        );
        Self {
            outcome,
            from,
            to,
            audit,
        }
    }

    /// Returns true if the record set changed and must be persisted.
    pub fn is_mutation(&self) -> bool {
        self.audit.is_some()
    }
}

/// Outcome of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequestOutcome {
    /// First request for this identity; a pending record was created.
    Created,
    /// An inactive record was marked pending again.
    Reopened,
    /// The identity already holds an active subscription; grant now.
    AlreadyActive,
}

impl AccessRequestOutcome {
    /// Returns true if the caller should invoke the access gateway.
    pub fn is_grantable(&self) -> bool {
        matches!(self, AccessRequestOutcome::AlreadyActive)
    }
}

/// Outcome of an administrative upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The record as saved.
    pub record: SubscriptionRecord,
    /// True if no record existed for the identity.
    pub created: bool,
}

/// Outcome of an administrative delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
}

/// Record an access request for `identity`.
///
/// # Errors
///
/// Returns `InvalidIdentity` if `identity` is malformed; the set is untouched.
pub fn request_access(
    records: &mut SubscriptionSet,
    identity: &str,
    today: NaiveDate,
    now: Timestamp,
) -> Result<Transition<AccessRequestOutcome>, SubscriptionError> {
    let identity =
        Identity::new(identity).map_err(|e| SubscriptionError::invalid_identity(identity, e))?;

    let Some(record) = records.get_mut(&identity) else {
        let audit = pending_request_event(&identity);
        records.insert(SubscriptionRecord::pending_request(identity, now));
        return Ok(Transition::new(
            AccessRequestOutcome::Created,
            SubscriptionState::Unknown,
            SubscriptionState::Pending,
            Some(audit),
        ));
    };

    let from = record.state(today);
    if is_grantable(Some(&*record), today) {
        return Ok(Transition::new(
            AccessRequestOutcome::AlreadyActive,
            from,
            from,
            None,
        ));
    }

    record.reopen_request(now);
    Ok(Transition::new(
        AccessRequestOutcome::Reopened,
        from,
        record.state(today),
        Some(pending_request_event(&identity)),
    ))
}

/// Create or overwrite the subscription described by `terms`.
///
/// Validation happens when `terms` is built, so this cannot fail.
pub fn upsert_subscription(
    records: &mut SubscriptionSet,
    terms: &SubscriptionTerms,
    today: NaiveDate,
    now: Timestamp,
) -> Transition<UpsertOutcome> {
    let (from, record, created) = match records.get_mut(terms.identity()) {
        Some(existing) => {
            let from = existing.state(today);
            existing.apply_terms(terms, now);
            (from, existing.clone(), false)
        }
        None => {
            let record = SubscriptionRecord::from_terms(terms, now);
            records.insert(record.clone());
            (SubscriptionState::Unknown, record, true)
        }
    };

    let audit = AuditEvent::new(AuditAction::SubscriptionSaved)
        .with_detail("identity", terms.identity().as_str())
        .with_detail("active", terms.active())
        .with_detail("duration_days", terms.duration_days())
        .with_detail("payment_date", terms.payment_date().to_string())
        .with_detail("end_date", terms.end_date().to_string());

    let to = record.state(today);
    Transition::new(UpsertOutcome { record, created }, from, to, Some(audit))
}

/// Remove the record for `identity`, if any.
///
/// Deleting an absent identity is not an error. A `subscription-deleted`
/// event is produced either way; its `removed` detail says whether a
/// record was actually dropped.
pub fn delete_subscription(
    records: &mut SubscriptionSet,
    identity: &str,
    today: NaiveDate,
) -> Transition<DeleteOutcome> {
    let removed = records.remove(identity);
    let from = removed
        .as_ref()
        .map_or(SubscriptionState::Unknown, |r| r.state(today));
    let outcome = if removed.is_some() {
        DeleteOutcome::Removed
    } else {
        DeleteOutcome::NotFound
    };

    let audit = AuditEvent::new(AuditAction::SubscriptionDeleted)
        .with_detail("identity", identity)
        .with_detail("removed", removed.is_some());

    Transition::new(outcome, from, SubscriptionState::Deleted, Some(audit))
}

/// The single predicate gating the access gateway: a record exists and is
/// active on `today`.
pub fn is_grantable(record: Option<&SubscriptionRecord>, today: NaiveDate) -> bool {
    record.is_some_and(|r| r.state(today).has_access())
}

/// Audit event for a lazy-expiry sweep that flipped `expired` records.
pub fn expiry_event(expired: &[Identity]) -> AuditEvent {
    AuditEvent::new(AuditAction::AutoExpire).with_detail("expired_count", expired.len())
}

fn pending_request_event(identity: &Identity) -> AuditEvent {
    AuditEvent::new(AuditAction::PendingRequest).with_detail("identity", identity.as_str())
}
