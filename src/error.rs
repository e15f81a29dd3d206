//! Custom error types for Daily
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The encryption engine's failure kinds each
//! get their own variant so callers can match on them instead of parsing text.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Daily operations
#[derive(Error, Debug)]
pub enum DailyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors (bad input, mismatched passphrases, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cipher or key-derivation setup failures
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// No key is cached for the workspace being read or written
    #[error("Session is locked: unlock the workspace first")]
    SessionLocked,

    /// Buffer is too short or does not carry the expected magic tag
    #[error("Invalid encrypted file format: {0}")]
    InvalidFormat(String),

    /// AEAD tag did not verify
    #[error("Decryption failed: wrong passphrase or corrupt data")]
    AuthenticationFailed,

    /// The derived key could not decrypt existing workspace data
    #[error("Wrong passphrase for workspace '{0}'")]
    WrongPassphrase(String),

    /// The workspace is flagged as encrypted but its salt file is gone
    #[error("Salt file missing in encrypted directory {}", .0.display())]
    SaltMissing(PathBuf),

    /// Migration failed; every path in `restore_failures` could not be rolled back
    #[error("Encryption migration failed: {cause}; {restore_failures}")]
    Migration {
        cause: Box<DailyError>,
        restore_failures: RestoreFailures,
    },
}

/// Files a migration rollback could not write back, with the reason for each
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestoreFailures(pub Vec<(PathBuf, String)>);

impl RestoreFailures {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.0.iter().map(|(path, _)| path)
    }
}

impl fmt::Display for RestoreFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "all files were rolled back");
        }
        write!(f, "could not restore: ")?;
        for (i, (path, reason)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ({})", path.display(), reason)?;
        }
        Ok(())
    }
}

impl DailyError {
    /// Create a "not found" error for workspaces
    pub fn workspace_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Workspace",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for data files
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: path.into().display().to_string(),
        }
    }

    /// Create a "not found" error for todos
    pub fn todo_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Todo",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the key did not match the data
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::WrongPassphrase(_))
    }

    /// Check if a migration left files it could not restore
    pub fn has_restore_failures(&self) -> bool {
        matches!(self, Self::Migration { restore_failures, .. } if !restore_failures.is_empty())
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DailyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DailyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Daily operations
pub type DailyResult<T> = Result<T, DailyError>;
