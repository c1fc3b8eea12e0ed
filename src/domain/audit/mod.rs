//! Audit domain module.
//!
//! The append-only trail of administrative and automatic actions.

mod entry;

pub use entry::{
    AuditAction, AuditDetails, AuditEntry, AuditEvent, DEFAULT_RECENT_LIMIT, SYSTEM_ORIGIN,
    UNKNOWN_ORIGIN,
};
