//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SubscriptionStore` - Durable record set with read-time expiry
//! - `AuditLog` - Append-only audit trail
//!
//! ## Collaborator Ports
//!
//! - `Clock` - Current date and time
//! - `AccessGateway` - Side-effecting access grant
//! - `IdentityVerifier` - Upstream proof that a requester owns an identity

mod access_gateway;
mod audit_log;
mod clock;
mod identity_verifier;
mod storage_error;
mod subscription_store;

pub use access_gateway::{AccessGateway, GatewayError};
pub use audit_log::AuditLog;
pub use clock::Clock;
pub use identity_verifier::{IdentityVerifier, VerificationError};
pub use storage_error::StorageError;
pub use subscription_store::SubscriptionStore;
