//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers run the `load -> decide -> save -> audit` cycle under a
//! shared [`StoreLock`]; query handlers only read.

pub mod handlers;
mod store_lock;

pub use handlers::{
    // Subscription commands
    AccessDecision, RequestAccessCommand, RequestAccessHandler, RequestAccessResult,
    DeleteSubscriptionCommand, DeleteSubscriptionHandler, DeleteSubscriptionResult,
    UpsertSubscriptionCommand, UpsertSubscriptionHandler, UpsertSubscriptionResult,
    // Subscription queries
    ListSubscriptionsHandler, ListSubscriptionsQuery, RecentAuditEntriesHandler,
    RecentAuditEntriesQuery,
    // Admin session
    AdminSession, AdminSessionError, AdminSessionHandler,
};
pub use store_lock::StoreLock;
