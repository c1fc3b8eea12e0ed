//! RequestAccessHandler - Command handler for access requests.

use std::sync::Arc;

use crate::application::StoreLock;
use crate::domain::foundation::Identity;
use crate::domain::subscription::{self, AccessRequestOutcome, SubscriptionError};
use crate::ports::{AccessGateway, AuditLog, Clock, GatewayError, IdentityVerifier, SubscriptionStore};

use super::commit;

/// Command to request access for an identity.
#[derive(Debug, Clone)]
pub struct RequestAccessCommand {
    /// Identity as supplied by the caller; surrounding whitespace is ignored.
    pub identity: String,
    /// Proof from the upstream verifier, if the request carried one.
    pub attestation: Option<String>,
    /// Audit origin of the request.
    pub origin: String,
}

/// What happened to the access request.
#[derive(Debug)]
pub enum AccessDecision {
    /// Recorded; waiting on an administrator.
    Pending,
    /// The identity holds an active subscription and the gateway granted access.
    Granted,
    /// The identity holds an active subscription but the gateway failed.
    GrantFailed(GatewayError),
}

/// Result of an access request.
#[derive(Debug)]
pub struct RequestAccessResult {
    pub identity: Identity,
    pub outcome: AccessRequestOutcome,
    pub decision: AccessDecision,
}

/// Handler for access requests.
///
/// Requests are verified before the store is touched. Grantable identities
/// are handed to the access gateway after the store lock is released.
/// Grant failures are reported, not retried.
pub struct RequestAccessHandler {
    store: Arc<dyn SubscriptionStore>,
    audit_log: Arc<dyn AuditLog>,
    gateway: Arc<dyn AccessGateway>,
    verifier: Arc<dyn IdentityVerifier>,
    clock: Arc<dyn Clock>,
    lock: StoreLock,
}

impl RequestAccessHandler {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        audit_log: Arc<dyn AuditLog>,
        gateway: Arc<dyn AccessGateway>,
        verifier: Arc<dyn IdentityVerifier>,
        clock: Arc<dyn Clock>,
        lock: StoreLock,
    ) -> Self {
        Self {
            store,
            audit_log,
            gateway,
            verifier,
            clock,
            lock,
        }
    }

    pub async fn handle(&self, cmd: RequestAccessCommand) -> Result<RequestAccessResult, SubscriptionError> {
        let requested = cmd.identity.trim();
        let identity =
            Identity::new(requested).map_err(|e| SubscriptionError::invalid_identity(requested, e))?;

        if let Err(e) = self.verifier.verify(&identity, cmd.attestation.as_deref()).await {
            tracing::warn!(identity = %identity, origin = %cmd.origin, reason = %e, "Access request not verified");
            return Err(SubscriptionError::unverified(identity.as_str(), e));
        }

        let outcome = {
            let _guard = self.lock.acquire().await;

            let mut records = self.store.load().await?;
            let now = self.clock.now();
            let transition = subscription::request_access(&mut records, identity.as_str(), now.date(), now)?;
            commit(
                self.store.as_ref(),
                self.audit_log.as_ref(),
                &records,
                &transition,
                &cmd.origin,
            )
            .await?;

            if transition.is_mutation() {
                tracing::info!(
                    identity = %identity,
                    from = ?transition.from,
                    origin = %cmd.origin,
                    "Access request recorded as pending"
                );
            }
            transition.outcome
        };

        let decision = if outcome.is_grantable() {
            match self.gateway.grant(&identity).await {
                Ok(()) => {
                    tracing::info!(identity = %identity, "Access granted");
                    AccessDecision::Granted
                }
                Err(e) => {
                    tracing::warn!(identity = %identity, error = %e, "Access grant failed");
                    AccessDecision::GrantFailed(e)
                }
            }
        } else {
            AccessDecision::Pending
        };

        Ok(RequestAccessResult {
            identity,
            outcome,
            decision,
        })
    }
}
