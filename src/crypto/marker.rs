//! Encrypted-directory marker
//!
//! A zero-byte `.encrypted` file switches a directory into encrypted mode.
//! Nothing else about the directory records that state.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{DailyError, DailyResult};

/// Marker file name inside a managed directory
pub const MARKER_FILE: &str = ".encrypted";

/// Path of the marker file for a directory
pub fn marker_path(dir: &Path) -> PathBuf {
    dir.join(MARKER_FILE)
}

/// Whether data files in this directory are expected to be encrypted
pub fn is_encryption_enabled(dir: &Path) -> bool {
    marker_path(dir).is_file()
}

/// Create the marker file. An existing marker is left untouched.
pub fn write_marker(dir: &Path) -> DailyResult<()> {
    let path = marker_path(dir);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file
            .sync_all()
            .map_err(|e| DailyError::Io(format!("Failed to sync {}: {}", path.display(), e))),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(DailyError::Io(format!(
            "Failed to create {}: {}",
            path.display(),
            e
        ))),
    }
}
