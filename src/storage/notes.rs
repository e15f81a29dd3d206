//! Note repository
//!
//! Markdown notes live under `<workspace>/notes/`, possibly in subdirectories.

use std::path::PathBuf;

use tempfile::TempPath;

use crate::config::Workspace;
use crate::crypto::files::decrypt_to_temp_file;
use crate::crypto::DerivedKey;
use crate::error::{DailyError, DailyResult};

use super::file_io::read_bytes;
use super::{read_data, write_data};

/// Repository for note persistence
pub struct NoteRepository<'a> {
    workspace: &'a Workspace,
    key: Option<&'a DerivedKey>,
}

impl<'a> NoteRepository<'a> {
    pub fn new(workspace: &'a Workspace, key: Option<&'a DerivedKey>) -> Self {
        Self { workspace, key }
    }

    /// Note names relative to the notes directory
    pub fn list(&self) -> DailyResult<Vec<PathBuf>> {
        self.workspace.note_names()
    }

    /// Read a note as text
    pub fn read(&self, name: &str) -> DailyResult<String> {
        let bytes = read_data(&self.workspace.note_path(name)?, self.key)?;
        String::from_utf8(bytes)
            .map_err(|e| DailyError::Storage(format!("Note '{}' is not valid UTF-8: {}", name, e)))
    }

    /// Create or replace a note
    pub fn write(&self, name: &str, contents: &str) -> DailyResult<()> {
        let path = self.workspace.note_path(name)?;
        write_data(self.workspace.root(), &path, contents.as_bytes(), self.key)
    }

    /// Plaintext copy of a note in a temp file outside the workspace, for an
    /// external editor. A note that does not exist yet yields an empty file.
    pub fn checkout(&self, name: &str) -> DailyResult<TempPath> {
        let path = self.workspace.note_path(name)?;
        if !path.exists() {
            self.write(name, "")?;
        }
        decrypt_to_temp_file(&path, self.key)
    }

    /// Store the contents of an edited temp file back into the note
    pub fn checkin(&self, name: &str, edited: &TempPath) -> DailyResult<()> {
        let bytes = read_bytes(edited)?;
        let path = self.workspace.note_path(name)?;
        write_data(self.workspace.root(), &path, &bytes, self.key)
    }
}
