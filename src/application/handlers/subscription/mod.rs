//! Subscription handlers.
//!
//! ## Commands
//! - Requesting access (may invoke the access gateway)
//! - Creating or overwriting a subscription
//! - Deleting a subscription
//!
//! ## Queries
//! - Listing subscriptions (after lazy expiry)
//! - Recent audit entries

mod delete_subscription;
mod list_subscriptions;
mod recent_audit_entries;
mod request_access;
mod upsert_subscription;

// Commands
pub use delete_subscription::{
    DeleteSubscriptionCommand, DeleteSubscriptionHandler, DeleteSubscriptionResult,
};
pub use request_access::{
    AccessDecision, RequestAccessCommand, RequestAccessHandler, RequestAccessResult,
};
pub use upsert_subscription::{
    UpsertSubscriptionCommand, UpsertSubscriptionHandler, UpsertSubscriptionResult,
};

// Queries
pub use list_subscriptions::{ListSubscriptionsHandler, ListSubscriptionsQuery};
pub use recent_audit_entries::{RecentAuditEntriesHandler, RecentAuditEntriesQuery};

use crate::domain::subscription::{SubscriptionError, SubscriptionSet, Transition};
use crate::ports::{AuditLog, SubscriptionStore};

/// Append the transition's audit event, then persist the set.
///
/// The audit entry goes first so a persisted change is never missing from
/// the log.
///
/// Does nothing for a non-mutating transition.
async fn commit<T>(
    store: &dyn SubscriptionStore,
    audit_log: &dyn AuditLog,
    records: &SubscriptionSet,
    transition: &Transition<T>,
    origin: &str,
) -> Result<(), SubscriptionError> {
    let Some(event) = transition.audit.clone() else {
        return Ok(());
    };

    let action = event.action;
    if let Err(e) = audit_log.append(event, origin).await {
        tracing::warn!(error = %e, action = %action, "Audit append failed, change discarded");
        return Err(e.into());
    }
    if let Err(e) = store.save(records).await {
        tracing::warn!(error = %e, action = %action, "Subscription change audited but not saved");
        return Err(e.into());
    }
    Ok(())
}
