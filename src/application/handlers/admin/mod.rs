//! Admin handlers.
//!
//! Administrator login, logout, and session checks.

mod admin_session;

pub use admin_session::{AdminSession, AdminSessionError, AdminSessionHandler};
