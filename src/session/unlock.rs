//! Workspace unlock
//!
//! Resolves the workspace salt and hands the passphrase to the key store.

use crate::config::Workspace;
use crate::crypto::salt::{load_or_create_salt, read_salt};
use crate::error::DailyResult;

use super::SessionKeys;

/// Unlock a workspace for this session.
///
/// An encrypted workspace must already have its salt (`SaltMissing`
/// otherwise); a plaintext workspace gets one created on first use.
pub fn unlock_workspace(
    workspace: &Workspace,
    passphrase: &str,
    session: &mut SessionKeys,
) -> DailyResult<()> {
    let salt = if workspace.is_encryption_enabled() {
        read_salt(workspace.root())?
    } else {
        load_or_create_salt(workspace.root())?
    };

    session.unlock(workspace, passphrase, &salt)
}
