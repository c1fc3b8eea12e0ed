//! Audit actions, events and persisted entries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Number of entries returned by a recent-entries query when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Origin recorded for actions the system performs on its own (e.g. expiry sweeps).
pub const SYSTEM_ORIGIN: &str = "system";

/// Origin recorded when the caller's address cannot be determined.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Free-form key/value details attached to an audit entry.
///
/// A `BTreeMap` keeps keys sorted so persisted output is stable.
pub type AuditDetails = BTreeMap<String, Value>;

/// Every kind of action that can appear in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    /// Lazy expiry flipped one or more records to inactive.
    AutoExpire,
    /// An identity asked for access and is waiting on an administrator.
    PendingRequest,
    /// Administrator login was rejected.
    LoginFailed,
    /// Administrator logged in.
    LoginSuccess,
    /// Administrator logged out.
    Logout,
    /// Administrator created or overwrote a subscription.
    SubscriptionSaved,
    /// Administrator deleted a subscription.
    SubscriptionDeleted,
}

impl AuditAction {
    /// Returns the persisted name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AutoExpire => "auto-expire",
            AuditAction::PendingRequest => "pending-request",
            AuditAction::LoginFailed => "login-failed",
            AuditAction::LoginSuccess => "login-success",
            AuditAction::Logout => "logout",
            AuditAction::SubscriptionSaved => "subscription-saved",
            AuditAction::SubscriptionDeleted => "subscription-deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action the domain wants recorded, before it is stamped with an
/// origin and a time.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub details: AuditDetails,
}

impl AuditEvent {
    /// Creates an event with no details.
    pub fn new(action: AuditAction) -> Self {
        Self {
            action,
            details: AuditDetails::new(),
        }
    }

    /// Adds a detail to the event.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// A persisted, immutable audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,

    #[serde(default)]
    pub details: AuditDetails,

    /// Who caused the action: a network address, or `system`.
    #[serde(alias = "ip", default = "unknown_origin", deserialize_with = "origin_or_unknown")]
    pub origin: String,

    pub timestamp: Timestamp,
}

impl AuditEntry {
    /// Stamps an event with its origin and time.
    pub fn record(event: AuditEvent, origin: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            action: event.action,
            details: event.details,
            origin: origin.into(),
            timestamp,
        }
    }
}

fn unknown_origin() -> String {
    UNKNOWN_ORIGIN.to_string()
}

fn origin_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let origin = Option::<String>::deserialize(deserializer)?;
    Ok(origin
        .filter(|o| !o.is_empty())
        .unwrap_or_else(unknown_origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actions_serialize_kebab_case() {
        let all = [
            (AuditAction::AutoExpire, "auto-expire"),
            (AuditAction::PendingRequest, "pending-request"),
            (AuditAction::LoginFailed, "login-failed"),
            (AuditAction::LoginSuccess, "login-success"),
            (AuditAction::Logout, "logout"),
            (AuditAction::SubscriptionSaved, "subscription-saved"),
            (AuditAction::SubscriptionDeleted, "subscription-deleted"),
        ];
        for (action, name) in all {
            assert_eq!(serde_json::to_value(action).unwrap(), json!(name));
            assert_eq!(action.as_str(), name);
        }
    }

    #[test]
    fn with_detail_accumulates_details() {
        let event = AuditEvent::new(AuditAction::SubscriptionSaved)
            .with_detail("identity", "Steve123")
            .with_detail("duration_days", 30);

        assert_eq!(event.details.get("identity"), Some(&json!("Steve123")));
        assert_eq!(event.details.get("duration_days"), Some(&json!(30)));
    }

    #[test]
    fn entry_reads_legacy_ip_field() {
        let raw = json!({
            "action": "login-failed",
            "details": {},
            "ip": "10.0.0.7",
            "timestamp": "2024-02-01T08:00:00"
        });
        let entry: AuditEntry = serde_json::from_value(raw).unwrap();

        assert_eq!(entry.action, AuditAction::LoginFailed);
        assert_eq!(entry.origin, "10.0.0.7");
    }

    #[test]
    fn entry_with_null_origin_reads_as_unknown() {
        let raw = json!({
            "action": "auto-expire",
            "details": {"expired_count": 2},
            "ip": null,
            "timestamp": "2024-02-01T08:00:00Z"
        });
        let entry: AuditEntry = serde_json::from_value(raw).unwrap();

        assert_eq!(entry.origin, UNKNOWN_ORIGIN);
    }

    #[test]
    fn entry_writes_canonical_origin_field() {
        let entry = AuditEntry::record(
            AuditEvent::new(AuditAction::Logout),
            "127.0.0.1",
            Timestamp::now(),
        );
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["origin"], json!("127.0.0.1"));
        assert!(value.get("ip").is_none());
    }
}
