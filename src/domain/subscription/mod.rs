//! Subscription domain module.
//!
//! Handles the subscription record, its derived lifecycle state, lazy
//! expiry, and the pure decision logic for access requests and
//! administrative changes.
//!
//! # Module Structure
//!
//! - `record` - SubscriptionRecord entity
//! - `set` - SubscriptionSet, the identity-keyed record collection
//! - `state` - SubscriptionState state machine
//! - `terms` - Validated administrative upsert input
//! - `lifecycle` - Request/upsert/delete decisions and the grant predicate
//! - `errors` - SubscriptionError taxonomy

mod errors;
mod lifecycle;
mod record;
mod set;
mod state;
mod terms;

pub use errors::SubscriptionError;
pub use lifecycle::{
    delete_subscription, expiry_event, is_grantable, request_access, upsert_subscription, AccessRequestOutcome,
    DeleteOutcome, Transition, UpsertOutcome,
};
pub use record::SubscriptionRecord;
pub use set::SubscriptionSet;
pub use state::SubscriptionState;
pub use terms::SubscriptionTerms;
