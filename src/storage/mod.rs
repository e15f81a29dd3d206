//! Storage layer for Daily
//!
//! Every read and write of workspace data goes through [`read_data`] and
//! [`write_data`], which pick the plaintext or encrypted path per file. The
//! repositories built on top never see ciphertext.

pub mod file_io;
pub mod notes;
pub mod todos;

pub use file_io::{write_bytes_atomic, AtomicWriter, FileWriter};
pub use notes::NoteRepository;
pub use todos::TodoRepository;

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::Workspace;
use crate::crypto::encryption::encrypt;
use crate::crypto::files::{decode_bytes, require_key};
use crate::crypto::marker::is_encryption_enabled;
use crate::crypto::DerivedKey;
use crate::error::{DailyError, DailyResult};
use crate::session::SessionKeys;

use file_io::read_bytes;

/// Read a data file, decrypting it if it is framed
pub fn read_data(path: &Path, key: Option<&DerivedKey>) -> DailyResult<Vec<u8>> {
    decode_bytes(read_bytes(path)?, key)
}

/// Write a data file, encrypting it when `dir` carries the encryption marker
pub fn write_data(
    dir: &Path,
    path: &Path,
    bytes: &[u8],
    key: Option<&DerivedKey>,
) -> DailyResult<()> {
    if is_encryption_enabled(dir) {
        let framed = encrypt(bytes, require_key(key)?)?;
        write_bytes_atomic(path, &framed)
    } else {
        write_bytes_atomic(path, bytes)
    }
}

/// Read JSON through the storage contract, returning a default value if the file doesn't exist
pub fn read_json<T>(path: &Path, key: Option<&DerivedKey>) -> DailyResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match read_data(path, key) {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() => return Ok(T::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| DailyError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON through the storage contract
pub fn write_json<T: Serialize>(
    dir: &Path,
    path: &Path,
    data: &T,
    key: Option<&DerivedKey>,
) -> DailyResult<()> {
    let json = serde_json::to_vec_pretty(data)
        .map_err(|e| DailyError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_data(dir, path, &json, key)
}

/// Storage coordinator for one workspace
pub struct Storage<'a> {
    workspace: &'a Workspace,
    key: Option<&'a DerivedKey>,
}

impl<'a> Storage<'a> {
    /// Bind a workspace to whatever key the session holds for it
    pub fn new(workspace: &'a Workspace, session: &'a SessionKeys) -> Self {
        Self {
            workspace,
            key: session.get(workspace.name()),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        self.workspace
    }

    pub fn todos(&self) -> TodoRepository<'a> {
        TodoRepository::new(self.workspace, self.key)
    }

    pub fn notes(&self) -> NoteRepository<'a> {
        NoteRepository::new(self.workspace, self.key)
    }
}
