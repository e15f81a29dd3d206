//! User settings for Daily
//!
//! Manages the workspace registry (named data directories), the default
//! workspace selection and the editor preference.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::DailyPaths;
use super::workspace::Workspace;
use crate::error::DailyError;
use crate::storage::write_bytes_atomic;

/// Name of the workspace that always exists
pub const DEFAULT_WORKSPACE: &str = "default";

/// User settings for Daily
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Registered workspaces: name -> data directory
    #[serde(default)]
    pub workspaces: BTreeMap<String, PathBuf>,

    /// Workspace used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_workspace: Option<String>,

    /// Editor command for `note edit` (falls back to $EDITOR, then vi)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            workspaces: BTreeMap::new(),
            default_workspace: None,
            editor: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DailyPaths) -> Result<Self, DailyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DailyError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DailyError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DailyPaths) -> Result<(), DailyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DailyError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_bytes_atomic(&paths.settings_file(), contents.as_bytes())
    }

    /// Register a workspace directory under a name
    pub fn add_workspace(&mut self, name: &str, dir: PathBuf) -> Result<(), DailyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DailyError::Validation("Workspace name cannot be empty".into()));
        }
        if name == DEFAULT_WORKSPACE {
            return Err(DailyError::Validation(format!(
                "'{}' is reserved for the built-in workspace",
                DEFAULT_WORKSPACE
            )));
        }
        self.workspaces.insert(name.to_string(), dir);
        Ok(())
    }

    /// Make a registered workspace the default
    pub fn set_default(&mut self, name: &str) -> Result<(), DailyError> {
        if name != DEFAULT_WORKSPACE && !self.workspaces.contains_key(name) {
            return Err(DailyError::workspace_not_found(name));
        }
        self.default_workspace = Some(name.to_string());
        Ok(())
    }

    /// Resolve a workspace by name, or the default when `name` is `None`
    pub fn resolve_workspace(
        &self,
        paths: &DailyPaths,
        name: Option<&str>,
    ) -> Result<Workspace, DailyError> {
        let name = name
            .or(self.default_workspace.as_deref())
            .unwrap_or(DEFAULT_WORKSPACE);

        if name == DEFAULT_WORKSPACE {
            return Ok(Workspace::new(name, paths.default_workspace_dir()));
        }

        self.workspaces
            .get(name)
            .map(|dir| Workspace::new(name, dir.clone()))
            .ok_or_else(|| DailyError::workspace_not_found(name))
    }

    /// Editor command to launch for note editing
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}
