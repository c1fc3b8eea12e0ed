//! Access Gateway Adapters
//!
//! Implementations of the AccessGateway port.
//!
//! - **CommandAccessGateway** - runs an external program (e.g. `mcrcon`)
//! - **LoggingAccessGateway** - only logs (development)

mod command_gateway;
mod logging_gateway;

pub use command_gateway::{CommandAccessGateway, IDENTITY_PLACEHOLDER};
pub use logging_gateway::LoggingAccessGateway;

use std::sync::Arc;

use crate::config::{GatewayConfig, GatewayKind};
use crate::ports::AccessGateway;

/// Build the gateway selected by configuration.
pub fn from_config(config: &GatewayConfig) -> Arc<dyn AccessGateway> {
    match config.kind {
        GatewayKind::Log => Arc::new(LoggingAccessGateway::new()),
        GatewayKind::Command => {
            let mut gateway = CommandAccessGateway::new(&config.program)
                .with_args(config.args.clone())
                .with_timeout(config.timeout());
            if let Some(password) = &config.password {
                gateway = gateway.with_password(&config.password_env, password.clone());
            }
            Arc::new(gateway)
        }
    }
}
