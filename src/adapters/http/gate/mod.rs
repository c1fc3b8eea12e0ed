//! HTTP adapter for the subscription gate.
//!
//! - `POST /whitelist` - Request access for an identity
//! - `POST /admin/login` - Open an administrator session
//! - `POST /admin/logout` - Close the current session
//! - `GET /admin/subscriptions` - List subscriptions
//! - `POST /admin/subscriptions` - Create or overwrite a subscription
//! - `DELETE /admin/subscriptions/:identity` - Delete a subscription
//! - `GET /admin/log` - Recent audit entries
//! - `GET /health` - Liveness

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{GateApiError, GateAppState, ATTESTATION_HEADER};
pub use routes::{admin_routes, app_router, public_routes};
