//! HTTP adapters - REST API implementations.
//!
//! - `gate` - access requests and administrator endpoints
//! - `middleware` - admin authentication and audit-origin resolution

pub mod gate;
pub mod middleware;

// Re-export key types for convenience
pub use gate::{app_router, GateAppState, ATTESTATION_HEADER};
pub use middleware::{OriginResolver, RequestOrigin};
