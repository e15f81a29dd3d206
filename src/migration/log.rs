//! Migration transaction log
//!
//! Records the original bytes of every file rewritten during a migration, in
//! order, so a failed run can be undone newest-first.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::error::RestoreFailures;
use crate::storage::file_io::FileWriter;

/// Ordered (path, original bytes) pairs for files already rewritten
#[derive(Default)]
pub struct MigrationLog {
    entries: Vec<(PathBuf, Zeroizing<Vec<u8>>)>,
}

impl MigrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a file's contents from before it was rewritten
    pub fn record(&mut self, path: &Path, original: Vec<u8>) {
        self.entries
            .push((path.to_path_buf(), Zeroizing::new(original)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths recorded so far, oldest first
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(path, _)| path.as_path())
    }

    /// Write every recorded file back, newest first.
    ///
    /// A failed write does not stop the replay; each one is collected and
    /// returned.
    pub fn rollback<W: FileWriter + ?Sized>(self, writer: &mut W) -> RestoreFailures {
        let mut failures = Vec::new();
        for (path, original) in self.entries.into_iter().rev() {
            if let Err(e) = writer.write(&path, &original) {
                failures.push((path, e.to_string()));
            }
        }
        RestoreFailures(failures)
    }
}
