//! Identity verifier configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// How access requests are verified
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerifierKind {
    /// Everything reaching the gate was verified upstream
    #[default]
    Trusted,
    /// Requests must carry the upstream verifier's shared secret
    SharedSecret,
}

/// Identity verifier configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub kind: VerifierKind,

    /// Shared secret for `shared_secret` verifiers
    #[serde(default)]
    pub secret: Option<SecretString>,
}

impl VerifierConfig {
    /// Validate verifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_secret = self
            .secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        if self.kind == VerifierKind::SharedSecret && !has_secret {
            return Err(ValidationError::MissingRequired("VERIFIER__SECRET"));
        }
        Ok(())
    }
}
