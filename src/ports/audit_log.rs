//! Audit log port.

use async_trait::async_trait;

use crate::domain::audit::{AuditEntry, AuditEvent};

use super::StorageError;

/// Append-only audit trail.
///
/// Entries are never modified or removed. Growth is unbounded; rotation is
/// left to operators.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append `event`, stamped with `origin` and the current time.
    ///
    /// Previously recorded entries must survive a crash during the write.
    async fn append(&self, event: AuditEvent, origin: &str) -> Result<AuditEntry, StorageError>;

    /// Up to `limit` entries, most recent first.
    async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, StorageError>;
}
