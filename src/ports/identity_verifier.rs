//! Identity verifier port - confirms a requester may speak for an identity.
//!
//! Consulted before an access request touches the store. Proving who the
//! requester is (an account check, a community membership check) happens
//! upstream; this seam only decides whether that proof was presented.

use async_trait::async_trait;

use crate::domain::foundation::Identity;

/// Why a requester was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("No attestation presented")]
    MissingAttestation,

    #[error("Attestation rejected")]
    Rejected,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Accept or reject a request for `identity`.
    ///
    /// `attestation` is whatever the upstream verifier attached to the
    /// request, if anything.
    async fn verify(&self, identity: &Identity, attestation: Option<&str>) -> Result<(), VerificationError>;
}
