//! Trusted upstream verifier - accepts every access request.

use async_trait::async_trait;

use crate::domain::foundation::Identity;
use crate::ports::{IdentityVerifier, VerificationError};

/// Verifier for deployments where only an already-verified frontend can
/// reach `/whitelist`.
#[derive(Debug, Clone, Default)]
pub struct TrustedUpstreamVerifier;

impl TrustedUpstreamVerifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityVerifier for TrustedUpstreamVerifier {
    async fn verify(&self, _identity: &Identity, _attestation: Option<&str>) -> Result<(), VerificationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_without_attestation() {
        let verifier = TrustedUpstreamVerifier::new();
        let identity = Identity::new("Steve123").unwrap();

        assert!(verifier.verify(&identity, None).await.is_ok());
    }
}
