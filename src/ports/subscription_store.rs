//! Subscription store port.
//!
//! Defines the contract for loading and persisting the full subscription
//! record set.
//!
//! # Design
//!
//! - **Whole-set persistence**: the set is small, so it is read and written
//!   in full rather than per record
//! - **Lazy expiry**: every `load` flips lapsed records to inactive before
//!   returning, persisting and auditing the change
//! - **Single writer**: implementations do not lock; callers serialize the
//!   `load → mutate → save` sequence

use async_trait::async_trait;

use crate::domain::subscription::SubscriptionSet;

use super::StorageError;

/// Repository port for the subscription record set.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Load every record, expiring lapsed subscriptions first.
    ///
    /// If any record was expired the updated set is saved and a single
    /// `auto-expire` audit entry is appended before returning. A second
    /// call with nothing changed in between writes nothing.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the medium cannot be read or the sweep cannot be persisted
    /// - `Corrupt` if stored data cannot be decoded
    async fn load(&self) -> Result<SubscriptionSet, StorageError>;

    /// Atomically replace the stored set.
    ///
    /// On failure the previously stored set is left intact.
    async fn save(&self, records: &SubscriptionSet) -> Result<(), StorageError>;
}
