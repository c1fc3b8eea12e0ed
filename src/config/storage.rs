//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Locations of the persisted JSON documents
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Subscription record set
    #[serde(default = "default_subscriptions_path")]
    pub subscriptions_path: PathBuf,

    /// Administrative audit log
    #[serde(default = "default_audit_log_path")]
    pub audit_log_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subscriptions_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SUBSCRIPTIONS_PATH"));
        }
        if self.audit_log_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__AUDIT_LOG_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            subscriptions_path: default_subscriptions_path(),
            audit_log_path: default_audit_log_path(),
        }
    }
}

fn default_subscriptions_path() -> PathBuf {
    PathBuf::from("subscriptions.json")
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("admin_log.json")
}
