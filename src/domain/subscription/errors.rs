//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidIdentity | 400 |
//! | InvalidDate | 400 |
//! | InvalidDuration | 400 |
//! | Unverified | 403 |
//! | StorageUnavailable | 503 |

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors returned by subscription operations.
///
/// Validation variants are produced before anything is mutated. A
/// `StorageUnavailable` error means the operation was aborted and the
/// durable state should be treated as unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("Invalid identity '{value}': {reason}")]
    InvalidIdentity { value: String, reason: String },

    #[error("Invalid payment date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid duration '{value}': must be a positive number of days")]
    InvalidDuration { value: String },

    #[error("Access request for '{identity}' not verified: {reason}")]
    Unverified { identity: String, reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl SubscriptionError {
    pub fn invalid_identity(value: impl Into<String>, cause: ValidationError) -> Self {
        SubscriptionError::InvalidIdentity {
            value: value.into(),
            reason: cause.to_string(),
        }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        SubscriptionError::InvalidDate { value: value.into() }
    }

    pub fn invalid_duration(value: impl Into<String>) -> Self {
        SubscriptionError::InvalidDuration { value: value.into() }
    }

    pub fn unverified(identity: impl Into<String>, reason: impl ToString) -> Self {
        SubscriptionError::Unverified {
            identity: identity.into(),
            reason: reason.to_string(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        SubscriptionError::StorageUnavailable(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::InvalidIdentity { .. } => ErrorCode::InvalidIdentity,
            SubscriptionError::InvalidDate { .. } => ErrorCode::InvalidDate,
            SubscriptionError::InvalidDuration { .. } => ErrorCode::InvalidDuration,
            SubscriptionError::Unverified { .. } => ErrorCode::Forbidden,
            SubscriptionError::StorageUnavailable(_) => ErrorCode::StorageUnavailable,
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubscriptionError::StorageUnavailable(_))
    }
}
