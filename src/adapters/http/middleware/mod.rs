//! HTTP middleware for axum.
//!
//! - `admin_auth` - Bearer-token check for administrator routes
//! - `origin` - Maps a request to the origin recorded in the audit log

pub mod admin_auth;
pub mod origin;

pub use admin_auth::{admin_auth_middleware, AdminToken};
pub use origin::{OriginResolver, RequestOrigin};
