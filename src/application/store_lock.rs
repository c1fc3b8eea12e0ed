//! Store-wide mutual exclusion.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Guard shared by every handler that mutates the subscription store.
///
/// Held across the whole `load -> mutate -> save -> audit` sequence so two
/// concurrent requests cannot interleave their read-modify-write cycles.
/// Never held while the access gateway runs.
#[derive(Debug, Clone, Default)]
pub struct StoreLock(Arc<Mutex<()>>);

impl StoreLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}
