//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid gateway timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Invalid admin session lifetime (must be 1 second to 7 days)")]
    InvalidSessionTtl,

    #[error("Command gateway requires a program")]
    MissingGatewayProgram,

    #[error("Gateway arguments must not carry the password; set gateway.password_env instead")]
    PasswordInArguments,
}
