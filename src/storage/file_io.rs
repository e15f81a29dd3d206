//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.
//! Every data-file write goes through a [`FileWriter`]; the default writer
//! writes to a temp file in the same directory and renames it into place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DailyError, DailyResult};

/// Sink for whole-file writes
pub trait FileWriter {
    /// Replace the contents of `path` with `bytes`
    fn write(&mut self, path: &Path, bytes: &[u8]) -> DailyResult<()>;
}

/// Writes files atomically (write to temp, then rename)
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicWriter;

impl FileWriter for AtomicWriter {
    fn write(&mut self, path: &Path, bytes: &[u8]) -> DailyResult<()> {
        write_bytes_atomic(path, bytes)
    }
}

/// Read a whole file. A missing file is a `NotFound` error.
pub fn read_bytes(path: &Path) -> DailyResult<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DailyError::file_not_found(path)
        } else {
            DailyError::Storage(format!("Failed to read {}: {}", path.display(), e))
        }
    })
}

/// Write bytes to a file atomically
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> DailyResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Ensure parent directory exists
    fs::create_dir_all(parent).map_err(|e| {
        DailyError::Storage(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    // Create temp file in same directory (important for atomic rename)
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| DailyError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(bytes)
        .map_err(|e| DailyError::Storage(format!("Failed to write data: {}", e)))?;

    temp.flush()
        .map_err(|e| DailyError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| DailyError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename; the temp file is removed if this fails
    temp.persist(path).map_err(|e| {
        DailyError::Storage(format!(
            "Failed to replace {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");

        write_bytes_atomic(&path, b"{\"todos\":[]}").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"{\"todos\":[]}");
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");

        write_bytes_atomic(&path, b"first version that is long").unwrap();
        write_bytes_atomic(&path, b"second").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"second");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todos.json");

        AtomicWriter.write(&path, b"[]").unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes").join("work").join("a.md");

        write_bytes_atomic(&path, b"hello").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_bytes(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
