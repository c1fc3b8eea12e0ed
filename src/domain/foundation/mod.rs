//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, error types, and state machine trait that
//! form the vocabulary of the subscription domain.

mod errors;
mod identity;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use identity::Identity;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
