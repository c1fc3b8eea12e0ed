//! Identity Verifier Adapters
//!
//! Implementations of the IdentityVerifier port.
//!
//! - **TrustedUpstreamVerifier** - accepts every request (verification done in front of the gate)
//! - **SharedSecretVerifier** - requires the upstream verifier's shared secret on each request

mod shared_secret_verifier;
mod trusted_upstream_verifier;

pub use shared_secret_verifier::SharedSecretVerifier;
pub use trusted_upstream_verifier::TrustedUpstreamVerifier;

use std::sync::Arc;

use crate::config::{VerifierConfig, VerifierKind};
use crate::ports::IdentityVerifier;

/// Build the verifier selected by configuration.
///
/// A shared-secret verifier with no secret configured rejects everything;
/// `VerifierConfig::validate` refuses that configuration at startup.
pub fn from_config(config: &VerifierConfig) -> Arc<dyn IdentityVerifier> {
    match (config.kind, &config.secret) {
        (VerifierKind::Trusted, _) => Arc::new(TrustedUpstreamVerifier::new()),
        (VerifierKind::SharedSecret, Some(secret)) => Arc::new(SharedSecretVerifier::new(secret.clone())),
        (VerifierKind::SharedSecret, None) => Arc::new(SharedSecretVerifier::rejecting_all()),
    }
}
