//! Access gateway port - performs the actual access grant.
//!
//! Called only after the lifecycle confirms a record is grantable, and
//! never while the store lock is held.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::Identity;

/// Errors that can occur while granting access.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    #[error("Grant command failed: {0}")]
    CommandFailed(String),

    #[error("Grant timed out after {0:?}")]
    TimedOut(Duration),
}

/// Side-effecting grant of access to an identity (e.g. a whitelist add).
///
/// Implementations own their timeout policy. Callers do not retry.
#[async_trait]
pub trait AccessGateway: Send + Sync {
    async fn grant(&self, identity: &Identity) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn AccessGateway) {}
    }

    #[test]
    fn timed_out_displays_duration() {
        assert_eq!(GatewayError::TimedOut(Duration::from_secs(10)).to_string(), "Grant timed out after 10s");
    }
}
