//! Audit entry data structures
//!
//! Defines the security events recorded in the audit log and the entry format
//! itself. Entries never carry passphrases or key material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Security-relevant events that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEvent {
    /// A workspace was migrated to encrypted storage
    EncryptionEnabled,
    /// A migration failed and its files were rolled back
    MigrationRolledBack,
    /// A session key was derived and installed
    Unlocked,
    /// A passphrase did not decrypt existing data
    UnlockRejected,
    /// A session key was discarded
    SessionCleared,
}

impl std::fmt::Display for SecurityEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityEvent::EncryptionEnabled => write!(f, "ENCRYPTION_ENABLED"),
            SecurityEvent::MigrationRolledBack => write!(f, "MIGRATION_ROLLED_BACK"),
            SecurityEvent::Unlocked => write!(f, "UNLOCKED"),
            SecurityEvent::UnlockRejected => write!(f, "UNLOCK_REJECTED"),
            SecurityEvent::SessionCleared => write!(f, "SESSION_CLEARED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// What happened
    pub event: SecurityEvent,

    /// Workspace the event applies to
    pub workspace: String,

    /// Free-text detail (error message, file counts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Create an entry stamped with the current time
    pub fn new(event: SecurityEvent, workspace: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
            workspace: workspace.into(),
            detail: None,
        }
    }

    /// Attach a detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event,
            self.workspace
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}
