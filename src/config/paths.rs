//! Path management for Daily
//!
//! Provides platform-aware path resolution for configuration, the audit log and
//! the default workspace.
//!
//! ## Path Resolution Order
//!
//! 1. `DAILY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/daily-cli` on Linux,
//!    `~/Library/Application Support/daily-cli` on macOS, `%APPDATA%\daily-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::DailyError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DAILY_CLI_DATA_DIR";

/// Manages all paths used by Daily
#[derive(Debug, Clone)]
pub struct DailyPaths {
    /// Base directory for all Daily data
    base_dir: PathBuf,
}

impl DailyPaths {
    /// Create a new DailyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DailyError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DailyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Directory used for the built-in "default" workspace
    pub fn default_workspace_dir(&self) -> PathBuf {
        self.base_dir.join("workspaces").join("default")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DailyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DailyError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, DailyError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| DailyError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("daily-cli"))
}
