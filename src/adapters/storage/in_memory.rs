//! In-Memory Storage Adapters
//!
//! Keep subscriptions and audit entries in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::audit::{AuditEntry, AuditEvent, SYSTEM_ORIGIN};
use crate::domain::subscription::{expiry_event, SubscriptionSet};
use crate::ports::{AuditLog, Clock, StorageError, SubscriptionStore};

const MEMORY_PATH: &str = "<memory>";

/// In-memory subscription store with the same lazy-expiry behavior as the
/// file store.
#[derive(Clone)]
pub struct InMemorySubscriptionStore {
    records: Arc<RwLock<SubscriptionSet>>,
    clock: Arc<dyn Clock>,
    audit_log: Arc<dyn AuditLog>,
    save_count: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemorySubscriptionStore {
    /// Create an empty store
    pub fn new(clock: Arc<dyn Clock>, audit_log: Arc<dyn AuditLog>) -> Self {
        Self {
            records: Arc::new(RwLock::new(SubscriptionSet::new())),
            clock,
            audit_log,
            save_count: Arc::new(AtomicUsize::new(0)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the stored set without going through `save`
    pub async fn seed(&self, records: SubscriptionSet) {
        *self.records.write().await = records;
    }

    /// Current contents, without running expiry
    pub async fn snapshot(&self) -> SubscriptionSet {
        self.records.read().await.clone()
    }

    /// Number of successful writes so far
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail as if the medium were unavailable
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(Path::new(MEMORY_PATH), "writes disabled"));
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn load(&self) -> Result<SubscriptionSet, StorageError> {
        let mut records = self.records.read().await.clone();
        let now = self.clock.now();
        let expired = records.expire_lapsed(now.date(), now);
        if expired.is_empty() {
            return Ok(records);
        }

        self.audit_log
            .append(expiry_event(&expired), SYSTEM_ORIGIN)
            .await?;
        self.save(&records).await?;
        Ok(records)
    }

    async fn save(&self, records: &SubscriptionSet) -> Result<(), StorageError> {
        self.check_writable()?;
        *self.records.write().await = records.clone();
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory audit log
#[derive(Clone)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
    clock: Arc<dyn Clock>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryAuditLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            clock,
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// All entries, oldest first
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Make every subsequent append fail as if the medium were unavailable
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, event: AuditEvent, origin: &str) -> Result<AuditEntry, StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(Path::new(MEMORY_PATH), "writes disabled"));
        }
        let entry = AuditEntry::record(event, origin, self.clock.now());
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
