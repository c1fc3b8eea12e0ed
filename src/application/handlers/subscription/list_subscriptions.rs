//! ListSubscriptionsHandler - Query handler for the record set.

use std::sync::Arc;

use crate::application::StoreLock;
use crate::domain::subscription::{SubscriptionError, SubscriptionRecord};
use crate::ports::SubscriptionStore;

/// Query for all subscriptions.
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsQuery;

/// Handler listing every record, sorted by identity.
///
/// Loading may expire lapsed records and write them back, so the store
/// lock is taken like any command.
pub struct ListSubscriptionsHandler {
    store: Arc<dyn SubscriptionStore>,
    lock: StoreLock,
}

impl ListSubscriptionsHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, lock: StoreLock) -> Self {
        Self { store, lock }
    }

    pub async fn handle(&self, _query: ListSubscriptionsQuery) -> Result<Vec<SubscriptionRecord>, SubscriptionError> {
        let _guard = self.lock.acquire().await;
        Ok(self.store.load().await?.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{date, Harness};
    use super::*;
    use crate::domain::subscription::{SubscriptionSet, SubscriptionTerms};
    use crate::ports::Clock;

    #[tokio::test]
    async fn lists_sorted_records_after_expiry() {
        let h = Harness::on(date(2024, 2, 1));
        let record = |identity: &str| {
            let terms = SubscriptionTerms::new(identity, date(2024, 1, 1), 30, true).unwrap();
            SubscriptionRecord::from_terms(&terms, h.clock.now())
        };
        h.store
            .seed(SubscriptionSet::from_records([record("zed"), record("Alex")]))
            .await;

        let records = ListSubscriptionsHandler::new(h.store.clone(), h.lock.clone())
            .handle(ListSubscriptionsQuery)
            .await
            .unwrap();

        let identities: Vec<_> = records.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(identities, vec!["Alex", "zed"]);
        assert!(records.iter().all(|r| !r.active));
        assert_eq!(h.audit_log.len().await, 1);
    }
}
