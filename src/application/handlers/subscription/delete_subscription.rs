//! DeleteSubscriptionHandler - Command handler for removing subscriptions.

use std::sync::Arc;

use crate::application::StoreLock;
use crate::domain::subscription::{self, DeleteOutcome, SubscriptionError};
use crate::ports::{AuditLog, Clock, SubscriptionStore};

use super::commit;

/// Command to delete the subscription for an identity.
#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub identity: String,
    pub origin: String,
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSubscriptionResult {
    /// False if no record existed; the delete is still audited.
    pub removed: bool,
}

/// Handler for administrative deletes.
///
/// Idempotent. Deleting an identity with no record is not an error.
pub struct DeleteSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
    audit_log: Arc<dyn AuditLog>,
    clock: Arc<dyn Clock>,
    lock: StoreLock,
}

impl DeleteSubscriptionHandler {
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
        cmd: DeleteSubscriptionCommand,
    ) -> Result<DeleteSubscriptionResult, SubscriptionError> {
        let identity = cmd.identity.trim();
        let _guard = self.lock.acquire().await;

        let mut records = self.store.load().await?;
        let transition = subscription::delete_subscription(&mut records, identity, self.clock.today());
        commit(
            self.store.as_ref(),
            self.audit_log.as_ref(),
            &records,
            &transition,
            &cmd.origin,
        )
        .await?;

        let removed = transition.outcome == DeleteOutcome::Removed;
        tracing::info!(identity = %identity, removed, origin = %cmd.origin, "Subscription deleted");

        Ok(DeleteSubscriptionResult { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, Harness};
    use super::*;
    use crate::domain::audit::AuditAction;
    use crate::domain::subscription::{SubscriptionRecord, SubscriptionSet, SubscriptionTerms};
    use serde_json::json;

    fn handler(h: &Harness) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(h.store.clone(), h.audit_log.clone(), h.clock.clone(), h.lock.clone())
    }

    fn command(identity: &str) -> DeleteSubscriptionCommand {
        DeleteSubscriptionCommand {
            identity: identity.to_string(),
            origin: "admin-host".to_string(),
        }
    }

    #[tokio::test]
    async fn removes_existing_record() {
        let h = Harness::on(date(2024, 1, 1));
        let terms = SubscriptionTerms::new("Steve123", date(2024, 1, 1), 30, true).unwrap();
        h.store
            .seed(SubscriptionSet::from_records([SubscriptionRecord::from_terms(&terms, h.clock.now())]))
            .await;

        let result = handler(&h).handle(command("Steve123")).await.unwrap();

        assert!(result.removed);
        assert!(h.store.snapshot().await.is_empty());
        let entries = h.audit_log.entries().await;
        assert_eq!(entries[0].action, AuditAction::SubscriptionDeleted);
        assert_eq!(entries[0].details["removed"], json!(true));
    }

    #[tokio::test]
    async fn deleting_absent_identity_is_audited_not_an_error() {
        let h = Harness::on(date(2024, 1, 1));

        let result = handler(&h).handle(command("Ghost")).await.unwrap();

        assert!(!result.removed);
        let entries = h.audit_log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::SubscriptionDeleted);
        assert_eq!(entries[0].details["identity"], json!("Ghost"));
        assert_eq!(entries[0].details["removed"], json!(false));
    }

    #[tokio::test]
    async fn storage_failure_is_retryable() {
        let h = Harness::on(date(2024, 1, 1));
        h.store.set_fail_writes(true);

        let err = handler(&h).handle(command("Ghost")).await.unwrap_err();

        assert!(err.is_retryable());
        // The attempt is audited even though the set was not saved.
        assert_eq!(h.audit_log.len().await, 1);
    }
}
