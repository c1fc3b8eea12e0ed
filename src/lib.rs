//! Subscription Gate - Time-boxed access driven by paid subscriptions
//!
//! Keeps one subscription record per external identity, expires lapsed
//! records lazily whenever the record set is read, records every
//! administrative action in an append-only audit log, and hands grantable
//! identities to an access gateway.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
