//! File-level encryption helpers
//!
//! Wraps the codec with file I/O. Keys are passed as `Option` because the
//! caller usually holds whatever the session has cached; a missing key only
//! becomes `SessionLocked` when a file actually needs one.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, TempPath};

use crate::error::{DailyError, DailyResult};
use crate::storage::file_io::{read_bytes, AtomicWriter, FileWriter};

use super::encryption::{decrypt, encrypt};
use super::framing::{parse, Framed};
use super::DerivedKey;

/// Resolve an optional session key, failing with `SessionLocked` when absent
pub fn require_key(key: Option<&DerivedKey>) -> DailyResult<&DerivedKey> {
    key.ok_or(DailyError::SessionLocked)
}

/// Decode bytes read from disk: plaintext passes through, frames are decrypted
pub fn decode_bytes(bytes: Vec<u8>, key: Option<&DerivedKey>) -> DailyResult<Vec<u8>> {
    match parse(&bytes) {
        Framed::Plaintext(_) => Ok(bytes),
        Framed::Encrypted(_) => decrypt(&bytes, require_key(key)?),
    }
}

/// Encrypt a file in place. Files that already parse as a frame are left as
/// they are.
pub fn encrypt_file(path: &Path, key: Option<&DerivedKey>) -> DailyResult<()> {
    encrypt_file_with(path, key, &mut AtomicWriter)
}

/// Encrypt a file in place through the given writer
pub fn encrypt_file_with<W: FileWriter + ?Sized>(
    path: &Path,
    key: Option<&DerivedKey>,
    writer: &mut W,
) -> DailyResult<()> {
    let bytes = read_bytes(path)?;
    if let Framed::Encrypted(_) = parse(&bytes) {
        return Ok(());
    }

    let framed = encrypt(&bytes, require_key(key)?)?;
    writer.write(path, &framed)
}

/// Read a file, decrypting it when it is framed and returning it raw otherwise
pub fn decrypt_file(path: &Path, key: Option<&DerivedKey>) -> DailyResult<Vec<u8>> {
    decode_bytes(read_bytes(path)?, key)
}

/// Decrypt a file into a fresh temp file outside the data directory.
///
/// The returned [`TempPath`] deletes the file when dropped, so holding it for
/// the duration of an editor session cleans up on every exit path.
pub fn decrypt_to_temp_file(path: &Path, key: Option<&DerivedKey>) -> DailyResult<TempPath> {
    let plaintext = decrypt_file(path, key)?;

    let suffix = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut temp = Builder::new()
        .prefix("daily-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| DailyError::Io(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(&plaintext)
        .and_then(|_| temp.flush())
        .map_err(|e| DailyError::Io(format!("Failed to write temp file: {}", e)))?;

    Ok(temp.into_temp_path())
}
