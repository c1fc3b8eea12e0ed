//! UpsertSubscriptionHandler - Command handler for saving subscriptions.

use std::sync::Arc;

use crate::application::StoreLock;
use crate::domain::subscription::{self, SubscriptionError, SubscriptionRecord, SubscriptionTerms};
use crate::ports::{AuditLog, Clock, SubscriptionStore};

use super::commit;

/// Command to create or overwrite a subscription.
///
/// Fields carry raw form input; they are validated before the store is touched.
#[derive(Debug, Clone)]
pub struct UpsertSubscriptionCommand {
    pub identity: String,
    /// `YYYY-MM-DD`
    pub payment_date: String,
    /// Strictly positive whole number of days
    pub duration_days: String,
    pub active: bool,
    pub origin: String,
}

/// Result of a successful upsert.
#[derive(Debug, Clone)]
pub struct UpsertSubscriptionResult {
    pub record: SubscriptionRecord,
    /// True if the identity had no record before.
    pub created: bool,
}

/// Handler for administrative subscription saves.
pub struct UpsertSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
    audit_log: Arc<dyn AuditLog>,
    clock: Arc<dyn Clock>,
    lock: StoreLock,
}

impl UpsertSubscriptionHandler {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        audit_log: Arc<dyn AuditLog>,
        clock: Arc<dyn Clock>,
        lock: StoreLock,
    ) -> Self {
        Self {
            store,
            audit_log,
            clock,
            lock,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpsertSubscriptionCommand,
    ) -> Result<UpsertSubscriptionResult, SubscriptionError> {
        // 1. Validate before touching anything
        let terms = SubscriptionTerms::parse(
            cmd.identity.trim(),
            &cmd.payment_date,
            &cmd.duration_days,
            cmd.active,
        )?;

        let _guard = self.lock.acquire().await;

        // 2. Load (applies lazy expiry) and decide
        let mut records = self.store.load().await?;
        let now = self.clock.now();
        let transition = subscription::upsert_subscription(&mut records, &terms, now.date(), now);

        // 3. Persist and audit
        commit(
            self.store.as_ref(),
            self.audit_log.as_ref(),
            &records,
            &transition,
            &cmd.origin,
        )
        .await?;

        tracing::info!(
            identity = %terms.identity(),
            created = transition.outcome.created,
            active = terms.active(),
            end_date = %terms.end_date(),
            origin = %cmd.origin,
            "Subscription saved"
        );

        Ok(UpsertSubscriptionResult {
            record: transition.outcome.record,
            created: transition.outcome.created,
        })
    }
}
