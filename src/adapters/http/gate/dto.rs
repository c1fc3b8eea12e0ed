//! HTTP DTOs (Data Transfer Objects) for gate endpoints.
//!
//! These types define the JSON request/response structure of the API.
//! They serve as the boundary between HTTP and the application layer.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::SubscriptionRecord;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request for access.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessRequest {
    pub identity: String,
}

/// Administrator login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Create or overwrite a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSubscriptionRequest {
    pub identity: String,
    /// `YYYY-MM-DD`
    pub payment_date: String,
    /// Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "string_or_number")]
    pub duration_days: String,
    #[serde(default)]
    pub active: bool,
}

/// Query string for the audit log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    pub limit: Option<usize>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Outcome of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Pending,
    Granted,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessResponse {
    pub identity: String,
    pub status: AccessStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Subscription as exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub identity: String,
    pub payment_date: Option<NaiveDate>,
    pub duration_days: u32,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub pending: bool,
    pub requested_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl From<SubscriptionRecord> for SubscriptionView {
    fn from(record: SubscriptionRecord) -> Self {
        Self {
            identity: record.identity.into(),
            payment_date: record.payment_date,
            duration_days: record.duration_days,
            end_date: record.end_date,
            active: record.active,
            pending: record.pending,
            requested_at: record.requested_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<SubscriptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveSubscriptionResponse {
    pub subscription: SubscriptionView,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteSubscriptionResponse {
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub entries: Vec<AuditEntry>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
