//! Workspace directory layout
//!
//! A workspace is a named data directory:
//!
//! ```text
//! <root>/todos.json        todo store
//! <root>/notes/**/*.md     notes tree
//! <root>/.salt             key-derivation salt (hex)
//! <root>/.encrypted        encryption marker
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::crypto::marker::{self, MARKER_FILE};
use crate::crypto::salt::SALT_FILE;
use crate::error::{DailyError, DailyResult};

/// A named workspace and its data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    name: String,
    root: PathBuf,
}

impl Workspace {
    pub fn new(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Workspace identifier, used as the session key-store key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn todos_file(&self) -> PathBuf {
        self.root.join("todos.json")
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    pub fn salt_file(&self) -> PathBuf {
        self.root.join(SALT_FILE)
    }

    pub fn marker_file(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    pub fn is_encryption_enabled(&self) -> bool {
        marker::is_encryption_enabled(&self.root)
    }

    /// Resolve a note name (with or without `.md`) to its path in the notes tree
    pub fn note_path(&self, name: &str) -> DailyResult<PathBuf> {
        let relative = Path::new(name);
        if !relative
            .components()
            .any(|c| matches!(c, std::path::Component::Normal(_)))
        {
            return Err(DailyError::Validation(format!(
                "Note name must name a file: '{}'",
                name
            )));
        }
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(DailyError::Validation(format!(
                "Note name must stay inside the notes directory: {}",
                name
            )));
        }

        let mut path = self.notes_dir().join(relative);
        if path.extension().map_or(true, |ext| ext != "md") {
            let mut file_name = path.file_name().unwrap_or_default().to_os_string();
            file_name.push(".md");
            path.set_file_name(file_name);
        }
        Ok(path)
    }

    /// Every current data file: the todo store (if present) followed by every
    /// Markdown file under the notes tree, in sorted order.
    pub fn data_files(&self) -> DailyResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        let todos = self.todos_file();
        if todos.is_file() {
            files.push(todos);
        }

        let notes = self.notes_dir();
        if notes.is_dir() {
            let mut notes_files = Vec::new();
            collect_markdown(&notes, &mut notes_files)?;
            notes_files.sort();
            files.extend(notes_files);
        }

        Ok(files)
    }

    /// Markdown files under the notes tree, relative to it
    pub fn note_names(&self) -> DailyResult<Vec<PathBuf>> {
        let notes = self.notes_dir();
        if !notes.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        collect_markdown(&notes, &mut files)?;
        files.sort();
        Ok(files
            .into_iter()
            .filter_map(|p| p.strip_prefix(&notes).ok().map(Path::to_path_buf))
            .collect())
    }
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> DailyResult<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| DailyError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| DailyError::Io(format!("Failed to read directory entry: {}", e)))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| DailyError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;

        if file_type.is_dir() {
            collect_markdown(&path, out)?;
        } else if file_type.is_file() && path.extension().map_or(false, |ext| ext == "md") {
            out.push(path);
        }
    }

    Ok(())
}
