//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod admin;
pub mod subscription;

pub use admin::{AdminSession, AdminSessionError, AdminSessionHandler};
pub use subscription::{
    AccessDecision, DeleteSubscriptionCommand, DeleteSubscriptionHandler, DeleteSubscriptionResult,
    ListSubscriptionsHandler, ListSubscriptionsQuery, RecentAuditEntriesHandler,
    RecentAuditEntriesQuery, RequestAccessCommand, RequestAccessHandler, RequestAccessResult,
    UpsertSubscriptionCommand, UpsertSubscriptionHandler, UpsertSubscriptionResult,
};
