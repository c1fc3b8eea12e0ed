//! Shared secret verifier - the upstream verifier attests each request.
//!
//! The service that checked the requester (for example a community
//! membership check) forwards the request with a secret only it and the
//! gate know. Comparison is constant-time.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::domain::foundation::Identity;
use crate::ports::{IdentityVerifier, VerificationError};

pub struct SharedSecretVerifier {
    secret: Option<SecretString>,
}

impl SharedSecretVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret: Some(secret) }
    }

    /// A verifier that accepts nothing.
    pub fn rejecting_all() -> Self {
        Self { secret: None }
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[async_trait]
impl IdentityVerifier for SharedSecretVerifier {
    async fn verify(&self, identity: &Identity, attestation: Option<&str>) -> Result<(), VerificationError> {
        let attestation = attestation.ok_or(VerificationError::MissingAttestation)?;
        let Some(secret) = &self.secret else {
            return Err(VerificationError::Rejected);
        };

        let expected = secret.expose_secret().as_bytes();
        let matches: bool = attestation.as_bytes().ct_eq(expected).into();
        if !matches {
            tracing::warn!(identity = %identity, "Access request carried a wrong attestation");
            return Err(VerificationError::Rejected);
        }
        Ok(())
    }
}
