//! File-based Audit Log Adapter
//!
//! Stores the audit trail as a single JSON array, oldest entry first.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::audit::{AuditEntry, AuditEvent};
use crate::ports::{AuditLog, Clock, StorageError};

use super::json_file;

/// File-backed append-only audit log.
///
/// Each append rewrites the whole document atomically. Appends are
/// serialized internally, so concurrent callers never drop each other's
/// entries.
pub struct FileAuditLog {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl FileAuditLog {
    /// Create an audit log backed by the JSON document at `path`.
    pub fn new<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<AuditEntry>, StorageError> {
        Ok(json_file::read_array(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl AuditLog for FileAuditLog {
    async fn append(&self, event: AuditEvent, origin: &str) -> Result<AuditEntry, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_all().await?;
        let entry = AuditEntry::record(event, origin, self.clock.now());
        entries.push(entry.clone());
        json_file::write_atomically(&self.path, &entries).await?;

        tracing::debug!(action = %entry.action, origin = %entry.origin, "Audit entry appended");
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, StorageError> {
        let entries = self.read_all().await?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }
}
