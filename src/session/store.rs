//! In-memory session key store
//!
//! Maps workspace identifiers to unlocked keys and tracks which workspace is
//! active. The store is an explicit value owned by whoever drives the session
//! and handed by reference to storage calls; it is never persisted.

use std::collections::HashMap;

use crate::config::Workspace;
use crate::crypto::encryption::decrypt;
use crate::crypto::framing::{parse, Framed};
use crate::crypto::key_derivation::{derive_key, SALT_LEN};
use crate::crypto::marker::is_encryption_enabled;
use crate::crypto::DerivedKey;
use crate::error::{DailyError, DailyResult};
use crate::storage::file_io::read_bytes;

/// Unlocked keys for the current process
#[derive(Debug, Default)]
pub struct SessionKeys {
    keys: HashMap<String, DerivedKey>,
    active: Option<String>,
}

impl SessionKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a key and cache it for `workspace`.
    ///
    /// When the workspace is already encrypted, the key must decrypt one of
    /// its existing files before it is installed. A key that fails is dropped
    /// and the store is left exactly as it was.
    pub fn unlock(
        &mut self,
        workspace: &Workspace,
        passphrase: &str,
        salt: &[u8; SALT_LEN],
    ) -> DailyResult<()> {
        let key = derive_key(passphrase, salt)?;

        if is_encryption_enabled(workspace.root()) {
            verify_key(workspace, &key).map_err(|e| {
                if e.is_auth_failure() {
                    DailyError::WrongPassphrase(workspace.name().to_string())
                } else {
                    e
                }
            })?;
        }

        self.install(workspace.name(), key);
        Ok(())
    }

    /// Cache an already-verified key and make its workspace active
    pub(crate) fn install(&mut self, workspace_id: &str, key: DerivedKey) {
        self.keys.insert(workspace_id.to_string(), key);
        self.active = Some(workspace_id.to_string());
    }

    /// Cached key for a workspace
    pub fn get(&self, workspace_id: &str) -> Option<&DerivedKey> {
        self.keys.get(workspace_id)
    }

    pub fn is_unlocked(&self, workspace_id: &str) -> bool {
        self.keys.contains_key(workspace_id)
    }

    /// Make `workspace_id` the active workspace.
    ///
    /// Returns whether a key is already cached for it; a cached key is reused
    /// as-is, so the caller only needs to prompt when this returns false.
    pub fn switch_active(&mut self, workspace_id: &str) -> bool {
        self.active = Some(workspace_id.to_string());
        self.is_unlocked(workspace_id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Key of the active workspace, or `SessionLocked`
    pub fn active_key(&self) -> DailyResult<&DerivedKey> {
        self.active
            .as_deref()
            .and_then(|id| self.keys.get(id))
            .ok_or(DailyError::SessionLocked)
    }

    /// Forget the key for one workspace. Returns whether one was cached.
    pub fn clear(&mut self, workspace_id: &str) -> bool {
        self.keys.remove(workspace_id).is_some()
    }

    /// Forget every cached key and the active selection. Returns the ids
    /// whose keys were dropped, sorted.
    pub fn clear_all(&mut self) -> Vec<String> {
        let mut cleared: Vec<String> = self.keys.drain().map(|(id, _)| id).collect();
        cleared.sort();
        self.active = None;
        cleared
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Check a key against the first encrypted data file in the workspace.
///
/// A workspace whose marker exists but which holds no encrypted file yet
/// accepts any key; there is nothing to check it against.
pub fn verify_key(workspace: &Workspace, key: &DerivedKey) -> DailyResult<()> {
    for path in workspace.data_files()? {
        let bytes = read_bytes(&path)?;
        if let Framed::Encrypted(_) = parse(&bytes) {
            decrypt(&bytes, key)?;
            return Ok(());
        }
    }
    Ok(())
}
