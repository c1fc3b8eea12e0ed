//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identity, timestamps, errors)
//! - `subscription` - Subscription records, lazy expiry and lifecycle decisions
//! - `audit` - Audit actions and entries

pub mod audit;
pub mod foundation;
pub mod subscription;
