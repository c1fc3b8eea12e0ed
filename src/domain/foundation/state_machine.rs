//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating state transitions of
//! lifecycle statuses.

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// assert!(SubscriptionState::Pending.can_transition_to(&SubscriptionState::Active));
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;
}
