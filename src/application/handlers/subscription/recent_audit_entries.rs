//! RecentAuditEntriesHandler - Query handler for the audit trail.

use std::sync::Arc;

use crate::domain::audit::{AuditEntry, DEFAULT_RECENT_LIMIT};
use crate::domain::subscription::SubscriptionError;
use crate::ports::AuditLog;

/// Query for the most recent audit entries.
#[derive(Debug, Clone, Default)]
pub struct RecentAuditEntriesQuery {
    /// Maximum entries to return; defaults to 50.
    pub limit: Option<usize>,
}

pub struct RecentAuditEntriesHandler {
    audit_log: Arc<dyn AuditLog>,
}

impl RecentAuditEntriesHandler {
    pub fn new(audit_log: Arc<dyn AuditLog>) -> Self {
        Self { audit_log }
    }

    /// Returns entries most recent first.
    pub async fn handle(&self, query: RecentAuditEntriesQuery) -> Result<Vec<AuditEntry>, SubscriptionError> {
        let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(self.audit_log.recent(limit).await?)
    }
}
