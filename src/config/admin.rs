//! Administrator configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Administrator credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Shared administrator password
    pub password: SecretString,

    /// How long a login stays valid
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl AdminConfig {
    /// Validate admin configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__PASSWORD"));
        }
        if self.session_ttl_secs == 0 || self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

const MAX_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

fn default_session_ttl_secs() -> u64 {
    8 * 60 * 60
}
