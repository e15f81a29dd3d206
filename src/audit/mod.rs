//! Audit logging for Daily
//!
//! Security events (encryption enabled, unlock accepted or rejected, session
//! cleared, migration rolled back) are appended to a line-delimited JSON log
//! so there is a record of what happened to each workspace.

mod entry;
mod logger;

pub use entry::{AuditEntry, SecurityEvent};
pub use logger::AuditLogger;
