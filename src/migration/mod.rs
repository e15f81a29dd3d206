//! One-time migration of a plaintext workspace into encrypted form
//!
//! `enable_encryption` validates the passphrase pair, derives and installs the
//! session key, encrypts every data file in place while recording originals
//! in a [`MigrationLog`], and writes the `.encrypted` marker as the very last
//! step. Any failure before the marker replays the log and drops the key, so
//! the marker only ever exists for a fully migrated workspace.

mod log;

pub use log::MigrationLog;

use crate::config::Workspace;
use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::framing::{parse, Framed};
use crate::crypto::key_derivation::derive_key;
use crate::crypto::marker::write_marker;
use crate::crypto::salt::load_or_create_salt;
use crate::crypto::{DerivedKey, SecureString};
use crate::error::{DailyError, DailyResult};
use crate::session::{unlock_workspace, SessionKeys};
use crate::storage::file_io::{read_bytes, AtomicWriter, FileWriter};

/// How an `enable_encryption` call finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Files were encrypted and the marker written
    Migrated {
        /// Files rewritten in this run
        encrypted: usize,
        /// Files that were already framed and left alone
        skipped: usize,
    },
    /// The workspace was already encrypted; it was unlocked instead
    AlreadyEnabled,
}

/// Enable encryption for a workspace
pub fn enable_encryption(
    workspace: &Workspace,
    passphrase: &SecureString,
    confirmation: &SecureString,
    session: &mut SessionKeys,
) -> DailyResult<MigrationOutcome> {
    enable_encryption_with(workspace, passphrase, confirmation, session, &mut AtomicWriter)
}

/// Enable encryption, routing every data-file write through `writer`
pub fn enable_encryption_with<W: FileWriter + ?Sized>(
    workspace: &Workspace,
    passphrase: &SecureString,
    confirmation: &SecureString,
    session: &mut SessionKeys,
    writer: &mut W,
) -> DailyResult<MigrationOutcome> {
    validate_passphrase_pair(passphrase, confirmation)?;

    if workspace.is_encryption_enabled() {
        unlock_workspace(workspace, passphrase, session)?;
        return Ok(MigrationOutcome::AlreadyEnabled);
    }

    let salt = load_or_create_salt(workspace.root())?;
    let key = derive_key(passphrase, &salt)?;
    session.install(workspace.name(), key.clone());

    let mut log = MigrationLog::new();
    match encrypt_all(workspace, &key, writer, &mut log) {
        Ok(skipped) => {
            let encrypted = log.len();
            Ok(MigrationOutcome::Migrated { encrypted, skipped })
        }
        Err(cause) => {
            let restore_failures = log.rollback(writer);
            session.clear(workspace.name());
            Err(DailyError::Migration {
                cause: Box::new(cause),
                restore_failures,
            })
        }
    }
}

/// Snapshot of a workspace's encryption state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionStatus {
    pub enabled: bool,
    pub salt_present: bool,
    pub encrypted_files: usize,
    pub plaintext_files: usize,
}

impl EncryptionStatus {
    /// Marker present but some files still plaintext, or the reverse
    pub fn is_inconsistent(&self) -> bool {
        (self.enabled && (self.plaintext_files > 0 || !self.salt_present))
            || (!self.enabled && self.encrypted_files > 0)
    }
}

/// Inspect every data file and report how many are in each form
pub fn encryption_status(workspace: &Workspace) -> DailyResult<EncryptionStatus> {
    let mut status = EncryptionStatus {
        enabled: workspace.is_encryption_enabled(),
        salt_present: workspace.salt_file().is_file(),
        encrypted_files: 0,
        plaintext_files: 0,
    };

    for path in workspace.data_files()? {
        if let Framed::Encrypted(_) = parse(&read_bytes(&path)?) {
            status.encrypted_files += 1;
        } else {
            status.plaintext_files += 1;
        }
    }

    Ok(status)
}

fn validate_passphrase_pair(
    passphrase: &SecureString,
    confirmation: &SecureString,
) -> DailyResult<()> {
    if passphrase.is_empty() {
        return Err(DailyError::Validation("Passphrase cannot be empty".into()));
    }
    if passphrase != confirmation {
        return Err(DailyError::Validation("Passphrases do not match".into()));
    }
    Ok(())
}

/// Encrypt every data file, then write the marker. Returns the number of
/// files skipped because they were already encrypted under `key`.
///
/// A frame that does not open under `key` fails the run, so the marker is
/// never written over data sealed with another passphrase.
fn encrypt_all<W: FileWriter + ?Sized>(
    workspace: &Workspace,
    key: &DerivedKey,
    writer: &mut W,
    log: &mut MigrationLog,
) -> DailyResult<usize> {
    let mut skipped = 0;

    for path in workspace.data_files()? {
        let original = read_bytes(&path)?;
        if let Framed::Encrypted(_) = parse(&original) {
            decrypt(&original, key)?;
            skipped += 1;
            continue;
        }

        let framed = encrypt(&original, key)?;
        writer.write(&path, &framed)?;
        log.record(&path, original);
    }

    write_marker(workspace.root())?;
    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::files::decrypt_file;
    use crate::crypto::framing::is_encrypted;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Fails the nth write (1-based) and passes everything else through
    struct FailingWriter {
        calls: usize,
        fail_on: usize,
    }

    impl FileWriter for FailingWriter {
        fn write(&mut self, path: &Path, bytes: &[u8]) -> DailyResult<()> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Err(DailyError::Io("injected write failure".into()));
            }
            AtomicWriter.write(path, bytes)
        }
    }

    /// Fails every write after the first
    struct BrokenDisk {
        calls: usize,
    }

    impl FileWriter for BrokenDisk {
        fn write(&mut self, path: &Path, bytes: &[u8]) -> DailyResult<()> {
            self.calls += 1;
            if self.calls > 1 {
                return Err(DailyError::Io("disk gone".into()));
            }
            AtomicWriter.write(path, bytes)
        }
    }

    fn pass(s: &str) -> SecureString {
        SecureString::new(s)
    }

    fn seeded_workspace(dir: &TempDir) -> Workspace {
        let ws = Workspace::new("home", dir.path().to_path_buf());
        fs::write(ws.todos_file(), br#"{"todos":[]}"#).unwrap();
        fs::create_dir_all(ws.notes_dir()).unwrap();
        fs::write(ws.notes_dir().join("a.md"), "hello").unwrap();
        ws
    }

    #[test]
    fn test_enable_encrypts_everything() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut session = SessionKeys::new();

        let outcome = enable_encryption(&ws, &pass("p"), &pass("p"), &mut session).unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                encrypted: 2,
                skipped: 0
            }
        );
        assert!(ws.marker_file().exists());
        let todos = ws.todos_file();
        let note = ws.notes_dir().join("a.md");
        assert!(is_encrypted(&fs::read(&todos).unwrap()));
        assert!(is_encrypted(&fs::read(&note).unwrap()));

        let key = session.get("home");
        assert_eq!(decrypt_file(&todos, key).unwrap(), br#"{"todos":[]}"#);
        assert_eq!(decrypt_file(&note, key).unwrap(), b"hello");
    }

    #[test]
    fn test_write_failure_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut session = SessionKeys::new();
        let mut writer = FailingWriter {
            calls: 0,
            fail_on: 2,
        };

        let err = enable_encryption_with(&ws, &pass("p"), &pass("p"), &mut session, &mut writer)
            .unwrap_err();

        assert!(matches!(err, DailyError::Migration { .. }));
        assert!(!err.has_restore_failures());
        assert_eq!(fs::read(ws.todos_file()).unwrap(), br#"{"todos":[]}"#);
        assert_eq!(fs::read(ws.notes_dir().join("a.md")).unwrap(), b"hello");
        assert!(!ws.marker_file().exists());
        assert!(session.get("home").is_none());
    }

    #[test]
    fn test_failed_rollback_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut session = SessionKeys::new();
        let mut writer = BrokenDisk { calls: 0 };

        let err = enable_encryption_with(&ws, &pass("p"), &pass("p"), &mut session, &mut writer)
            .unwrap_err();

        match err {
            DailyError::Migration {
                restore_failures, ..
            } => {
                let paths: Vec<_> = restore_failures.paths().cloned().collect();
                assert_eq!(paths, vec![ws.todos_file()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!ws.marker_file().exists());
        assert!(session.is_empty());
    }

    #[test]
    fn test_mismatched_passphrases_touch_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut session = SessionKeys::new();

        let err = enable_encryption(&ws, &pass("p"), &pass("q"), &mut session).unwrap_err();

        assert!(err.is_validation());
        assert!(!ws.salt_file().exists());
        assert!(!ws.marker_file().exists());
        assert_eq!(fs::read(ws.todos_file()).unwrap(), br#"{"todos":[]}"#);
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut session = SessionKeys::new();

        let err = enable_encryption(&ws, &pass(""), &pass(""), &mut session).unwrap_err();
        assert!(err.is_validation());
        assert!(!ws.salt_file().exists());
    }

    #[test]
    fn test_empty_workspace_gets_marker() {
        let temp_dir = TempDir::new().unwrap();
        let ws = Workspace::new("empty", temp_dir.path().to_path_buf());
        let mut session = SessionKeys::new();

        let outcome = enable_encryption(&ws, &pass("p"), &pass("p"), &mut session).unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                encrypted: 0,
                skipped: 0
            }
        );
        assert!(ws.marker_file().exists());
        assert!(session.is_unlocked("empty"));
    }

    #[test]
    fn test_already_enabled_delegates_to_unlock() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut first = SessionKeys::new();
        enable_encryption(&ws, &pass("p"), &pass("p"), &mut first).unwrap();
        let before = fs::read(ws.todos_file()).unwrap();

        let mut second = SessionKeys::new();
        let outcome = enable_encryption(&ws, &pass("p"), &pass("p"), &mut second).unwrap();

        assert_eq!(outcome, MigrationOutcome::AlreadyEnabled);
        assert_eq!(fs::read(ws.todos_file()).unwrap(), before);
        assert_eq!(first.get("home"), second.get("home"));
    }

    #[test]
    fn test_already_enabled_wrong_passphrase() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let mut first = SessionKeys::new();
        enable_encryption(&ws, &pass("p"), &pass("p"), &mut first).unwrap();

        let mut second = SessionKeys::new();
        let err = enable_encryption(&ws, &pass("x"), &pass("x"), &mut second).unwrap_err();

        assert!(matches!(err, DailyError::WrongPassphrase(_)));
        assert!(second.get("home").is_none());
    }

    #[test]
    fn test_status_before_and_after() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);

        let before = encryption_status(&ws).unwrap();
        assert!(!before.enabled);
        assert_eq!(before.plaintext_files, 2);
        assert!(!before.is_inconsistent());

        let mut session = SessionKeys::new();
        enable_encryption(&ws, &pass("p"), &pass("p"), &mut session).unwrap();

        let after = encryption_status(&ws).unwrap();
        assert!(after.enabled);
        assert!(after.salt_present);
        assert_eq!(after.encrypted_files, 2);
        assert_eq!(after.plaintext_files, 0);
        assert!(!after.is_inconsistent());
    }

    #[test]
    fn test_partially_encrypted_files_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let salt = load_or_create_salt(ws.root()).unwrap();
        let key = derive_key("p", &salt).unwrap();
        let framed = encrypt(b"hello", &key).unwrap();
        fs::write(ws.notes_dir().join("a.md"), &framed).unwrap();
        let mut session = SessionKeys::new();

        let outcome = enable_encryption(&ws, &pass("p"), &pass("p"), &mut session).unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                encrypted: 1,
                skipped: 1
            }
        );
        assert_eq!(fs::read(ws.notes_dir().join("a.md")).unwrap(), framed);
    }

    #[test]
    fn test_frame_under_another_passphrase_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let salt = load_or_create_salt(ws.root()).unwrap();
        let old_key = derive_key("old", &salt).unwrap();
        let stale = encrypt(br#"{"todos":[]}"#, &old_key).unwrap();
        fs::write(ws.todos_file(), &stale).unwrap();
        let mut session = SessionKeys::new();

        let err = enable_encryption(&ws, &pass("new"), &pass("new"), &mut session).unwrap_err();

        match err {
            DailyError::Migration {
                cause,
                restore_failures,
            } => {
                assert!(matches!(*cause, DailyError::AuthenticationFailed));
                assert!(restore_failures.is_empty());
            }
            other => panic!("expected a migration error, got {:?}", other),
        }
        assert!(!ws.is_encryption_enabled());
        assert!(session.is_empty());
        assert_eq!(fs::read(ws.todos_file()).unwrap(), stale);
        assert_eq!(fs::read(ws.notes_dir().join("a.md")).unwrap(), b"hello");
    }

    #[test]
    fn test_note_starting_with_magic_is_encrypted() {
        let temp_dir = TempDir::new().unwrap();
        let ws = seeded_workspace(&temp_dir);
        let note = ws.notes_dir().join("b.md");
        fs::write(&note, "DAILY_ENC_V1 idea").unwrap();
        let mut session = SessionKeys::new();

        let outcome = enable_encryption(&ws, &pass("p"), &pass("p"), &mut session).unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                encrypted: 3,
                skipped: 0
            }
        );
        let key = session.get("home").unwrap();
        assert_eq!(decrypt_file(&note, Some(key)).unwrap(), b"DAILY_ENC_V1 idea");
    }
}
