//! Storage Adapters
//!
//! Implementations of the SubscriptionStore and AuditLog ports.
//!
//! ## Available Adapters
//!
//! - **FileSubscriptionStore** / **FileAuditLog** - JSON documents on disk,
//!   replaced atomically on every write
//! - **InMemorySubscriptionStore** / **InMemoryAuditLog** - In-memory
//!   (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileAuditLog, FileSubscriptionStore};
//!
//! let clock = Arc::new(SystemClock::new());
//! let audit_log = Arc::new(FileAuditLog::new("admin_log.json", clock.clone()));
//! let store = FileSubscriptionStore::new("subscriptions.json", clock, audit_log);
//! ```

mod file_audit_log;
mod file_subscription_store;
mod in_memory;
mod json_file;

pub use file_audit_log::FileAuditLog;
pub use file_subscription_store::FileSubscriptionStore;
pub use in_memory::{InMemoryAuditLog, InMemorySubscriptionStore};
