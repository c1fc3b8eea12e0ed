//! Subscription state machine.
//!
//! The logical state of an identity is derived from its record (or the
//! absence of one) and the current date.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a single identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// No record exists.
    Unknown,

    /// Access requested, awaiting an administrator.
    Pending,

    /// Paid and within the subscription window. Grants access.
    Active,

    /// Window lapsed, or an administrator saved the record as inactive.
    Expired,

    /// Record removed by an administrator. Terminal.
    Deleted,
}

impl SubscriptionState {
    /// Returns true if this state grants access.
    pub fn has_access(&self) -> bool {
        matches!(self, SubscriptionState::Active)
    }
}

impl StateMachine for SubscriptionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionState::*;
        matches!(
            (self, target),
            // From UNKNOWN: access request or administrative upsert
            (Unknown, Pending)
                | (Unknown, Active)
                | (Unknown, Expired)
            // From PENDING
                | (Pending, Pending) // Re-request
                | (Pending, Active)
                | (Pending, Expired) // Denied
            // From ACTIVE
                | (Active, Active) // Renewal
                | (Active, Pending)
                | (Active, Expired)
            // From EXPIRED
                | (Expired, Pending)
                | (Expired, Active)
                | (Expired, Expired)
            // Explicit delete, from anywhere but Deleted
                | (Unknown, Deleted)
                | (Pending, Deleted)
                | (Active, Deleted)
                | (Expired, Deleted)
        )
    }
}
