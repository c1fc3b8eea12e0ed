//! File-based Subscription Store Adapter
//!
//! Keeps the full record set in one JSON array, sorted by identity, and
//! applies lazy expiry whenever the set is read.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::audit::SYSTEM_ORIGIN;
use crate::domain::subscription::{expiry_event, SubscriptionSet};
use crate::ports::{AuditLog, Clock, StorageError, SubscriptionStore};

use super::json_file;

/// File-backed subscription store.
///
/// Does no locking of its own; callers serialize `load -> save` cycles.
pub struct FileSubscriptionStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    audit_log: Arc<dyn AuditLog>,
}

impl FileSubscriptionStore {
    /// Create a store backed by the JSON document at `path`.
    ///
    /// Expiry sweeps are stamped by `clock` and recorded in `audit_log`.
    pub fn new<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>, audit_log: Arc<dyn AuditLog>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            clock,
            audit_log,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubscriptionStore for FileSubscriptionStore {
    async fn load(&self) -> Result<SubscriptionSet, StorageError> {
        let mut records: SubscriptionSet = json_file::read_array(&self.path)
            .await?
            .unwrap_or_default();

        let now = self.clock.now();
        let expired = records.expire_lapsed(now.date(), now);
        if expired.is_empty() {
            tracing::debug!(records = records.len(), "Subscriptions loaded, nothing lapsed");
            return Ok(records);
        }

        // Audit first: a failed append leaves the file untouched so the next
        // load sweeps again; a failed write after it only repeats the entry.
        self.audit_log
            .append(expiry_event(&expired), SYSTEM_ORIGIN)
            .await?;
        json_file::write_atomically(&self.path, &records).await?;

        tracing::info!(
            expired_count = expired.len(),
            identities = ?expired.iter().map(|i| i.as_str()).collect::<Vec<_>>(),
            "Lapsed subscriptions expired"
        );
        Ok(records)
    }

    async fn save(&self, records: &SubscriptionSet) -> Result<(), StorageError> {
        json_file::write_atomically(&self.path, records)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to save subscriptions");
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::storage::{FileAuditLog, InMemoryAuditLog};
    use crate::domain::audit::AuditAction;
    use crate::domain::foundation::{Identity, Timestamp};
    use crate::domain::subscription::{SubscriptionRecord, SubscriptionTerms};
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        _dir: TempDir,
        clock: Arc<FixedClock>,
        audit_log: Arc<FileAuditLog>,
        store: FileSubscriptionStore,
    }

    fn fixture(today: NaiveDate) -> Fixture {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::on(today));
        let audit_log = Arc::new(FileAuditLog::new(dir.path().join("admin_log.json"), clock.clone()));
        let store = FileSubscriptionStore::new(
            dir.path().join("subscriptions.json"),
            clock.clone(),
            audit_log.clone(),
        );
        Fixture {
            _dir: dir,
            clock,
            audit_log,
            store,
        }
    }

    fn active_record(identity: &str, paid: NaiveDate, days: i64) -> SubscriptionRecord {
        let terms = SubscriptionTerms::new(identity, paid, days, true).unwrap();
        SubscriptionRecord::from_terms(&terms, Timestamp::from_datetime(paid.and_hms_opt(9, 0, 0).unwrap().and_utc()))
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_empty_set() {
        let f = fixture(date(2024, 1, 1));

        let records = f.store.load().await.unwrap();

        assert!(records.is_empty());
        assert!(!f.store.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let f = fixture(date(2024, 1, 15));
        let records = SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]);

        f.store.save(&records).await.unwrap();
        let loaded = f.store.load().await.unwrap();

        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_load_expires_lapsed_records_and_audits_once() {
        let f = fixture(date(2024, 2, 1));
        f.store
            .save(&SubscriptionSet::from_records([
                active_record("Steve123", date(2024, 1, 1), 30),
                active_record("Alex_99", date(2024, 1, 20), 30),
            ]))
            .await
            .unwrap();

        let loaded = f.store.load().await.unwrap();

        assert!(!loaded.find("Steve123").unwrap().active);
        assert!(loaded.find("Alex_99").unwrap().active);
        let entries = f.audit_log.recent(50).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::AutoExpire);
        assert_eq!(entries[0].origin, SYSTEM_ORIGIN);
        assert_eq!(entries[0].details["expired_count"], json!(1));
    }

    #[tokio::test]
    async fn test_expiry_is_persisted() {
        let f = fixture(date(2024, 2, 1));
        f.store
            .save(&SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]))
            .await
            .unwrap();

        f.store.load().await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(f.store.path()).await.unwrap()).unwrap();
        assert_eq!(raw[0]["active"], json!(false));
    }

    #[tokio::test]
    async fn test_second_load_writes_and_audits_nothing() {
        let f = fixture(date(2024, 2, 1));
        f.store
            .save(&SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]))
            .await
            .unwrap();

        f.store.load().await.unwrap();
        let bytes_after_first = tokio::fs::read(f.store.path()).await.unwrap();
        f.store.load().await.unwrap();
        let bytes_after_second = tokio::fs::read(f.store.path()).await.unwrap();

        assert_eq!(bytes_after_first, bytes_after_second);
        assert_eq!(f.audit_log.recent(50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_is_active_through_end_date() {
        let f = fixture(date(2024, 1, 31));
        f.store
            .save(&SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]))
            .await
            .unwrap();

        let loaded = f.store.load().await.unwrap();

        assert!(loaded.find("Steve123").unwrap().active);
        assert!(f.audit_log.recent(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_identical_sets_produce_identical_bytes() {
        let f = fixture(date(2024, 1, 1));
        let a = active_record("alpha", date(2024, 1, 1), 30);
        let b = active_record("bravo", date(2024, 1, 1), 30);

        f.store
            .save(&SubscriptionSet::from_records([b.clone(), a.clone()]))
            .await
            .unwrap();
        let first = tokio::fs::read(f.store.path()).await.unwrap();
        f.store.save(&SubscriptionSet::from_records([a, b])).await.unwrap();
        let second = tokio::fs::read(f.store.path()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_reads_legacy_document() {
        let f = fixture(date(2024, 1, 15));
        tokio::fs::write(
            f.store.path(),
            r#"[
                {"mc_name": "Steve123", "payment_date": "2024-01-01", "duration_days": 30,
                 "end_date": "2024-01-31", "active": true, "pending": false,
                 "updated_at": "2024-01-01T09:00:00.123456", "notes": "ignored"},
                {"mc_name": "Alex", "payment_date": "", "duration_days": 0, "end_date": "",
                 "active": false, "pending": true,
                 "requested_at": "2024-01-10T08:00:00", "updated_at": "2024-01-10T08:00:00"}
            ]"#,
        )
        .await
        .unwrap();

        let loaded = f.store.load().await.unwrap();

        assert_eq!(loaded.len(), 2);
        let steve = loaded.find("Steve123").unwrap();
        assert_eq!(steve.end_date, Some(date(2024, 1, 31)));
        let alex = loaded.find("Alex").unwrap();
        assert_eq!(alex.payment_date, None);
        assert!(alex.pending);
    }

    #[tokio::test]
    async fn test_unreadable_date_does_not_hide_other_records() {
        let f = fixture(date(2024, 1, 15));
        tokio::fs::write(
            f.store.path(),
            r#"[
                {"mc_name": "Steve123", "payment_date": "2024-01-01", "duration_days": 30,
                 "end_date": "2024-01-31", "active": true, "pending": false,
                 "updated_at": "2024-01-01T09:00:00"},
                {"mc_name": "Alex", "payment_date": "2024-01-01", "duration_days": 30,
                 "end_date": "31/01/2024", "active": true, "pending": false,
                 "updated_at": "2024-01-01T09:00:00"}
            ]"#,
        )
        .await
        .unwrap();

        let loaded = f.store.load().await.unwrap();

        assert!(loaded.find("Steve123").unwrap().is_current(date(2024, 1, 15)));
        let alex = loaded.find("Alex").unwrap();
        assert_eq!(alex.end_date, None);
        assert!(!alex.is_current(date(2024, 1, 15)));
        assert!(f.audit_log.recent(50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_document_is_treated_as_empty() {
        let f = fixture(date(2024, 1, 1));
        tokio::fs::write(f.store.path(), r#"{"unexpected": true}"#).await.unwrap();

        assert!(f.store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_is_corrupt() {
        let f = fixture(date(2024, 1, 1));
        tokio::fs::write(f.store.path(), "[{ not json").await.unwrap();

        let result = f.store.load().await;

        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_failed_expiry_audit_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock::on(date(2024, 2, 1)));
        let audit_log = Arc::new(InMemoryAuditLog::new(clock.clone()));
        let store = FileSubscriptionStore::new(
            dir.path().join("subscriptions.json"),
            clock.clone(),
            audit_log.clone(),
        );
        store
            .save(&SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]))
            .await
            .unwrap();
        let before = tokio::fs::read(store.path()).await.unwrap();
        audit_log.set_fail_writes(true);

        assert!(store.load().await.is_err());
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), before);

        audit_log.set_fail_writes(false);
        assert!(!store.load().await.unwrap().find("Steve123").unwrap().active);
        let entries = audit_log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::AutoExpire);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_previous_state() {
        let f = fixture(date(2024, 1, 1));
        let original = SubscriptionSet::from_records([active_record("Steve123", date(2024, 1, 1), 30)]);
        f.store.save(&original).await.unwrap();
        tokio::fs::create_dir(json_file::temp_path(f.store.path())).await.unwrap();

        let mut changed = original.clone();
        changed.insert(SubscriptionRecord::pending_request(
            Identity::new("Alex").unwrap(),
            f.clock.now(),
        ));
        let result = f.store.save(&changed).await;

        assert!(matches!(result, Err(StorageError::Unavailable { .. })));
        assert_eq!(f.store.load().await.unwrap(), original);
    }
}
