//! Errors raised by durable storage adapters.

use std::path::Path;

use crate::domain::subscription::SubscriptionError;

/// Errors that can occur while reading or writing durable state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The medium could not be read or written.
    #[error("Storage unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// The medium was readable but its contents could not be decoded.
    #[error("Stored data at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

impl StorageError {
    pub fn unavailable(path: &Path, reason: impl ToString) -> Self {
        StorageError::Unavailable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn corrupt(path: &Path, reason: impl ToString) -> Self {
        StorageError::Corrupt {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<StorageError> for SubscriptionError {
    fn from(err: StorageError) -> Self {
        SubscriptionError::storage_unavailable(err.to_string())
    }
}
