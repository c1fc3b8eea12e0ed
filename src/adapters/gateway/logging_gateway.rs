//! Logging access gateway - records grants without performing them.

use async_trait::async_trait;

use crate::domain::foundation::Identity;
use crate::ports::{AccessGateway, GatewayError};

/// Gateway that only logs. Always succeeds.
#[derive(Debug, Clone, Default)]
pub struct LoggingAccessGateway;

impl LoggingAccessGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccessGateway for LoggingAccessGateway {
    async fn grant(&self, identity: &Identity) -> Result<(), GatewayError> {
        tracing::info!(identity = %identity, "Access grant (logging gateway, no command run)");
        Ok(())
    }
}
