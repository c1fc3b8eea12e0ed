//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `storage` - JSON-file and in-memory subscription store and audit log
//! - `gateway` - Access gateways (external command, logging)
//! - `verifier` - Identity verifiers (trusted upstream, shared secret)
//! - `http` - Axum REST API

pub mod clock;
pub mod gateway;
pub mod http;
pub mod storage;
pub mod verifier;

pub use clock::{FixedClock, SystemClock};
pub use gateway::{CommandAccessGateway, LoggingAccessGateway};
pub use http::{app_router, GateAppState, OriginResolver};
pub use storage::{FileAuditLog, FileSubscriptionStore, InMemoryAuditLog, InMemorySubscriptionStore};
pub use verifier::{SharedSecretVerifier, TrustedUpstreamVerifier};
