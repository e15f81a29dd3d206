//! Per-directory key-derivation salt
//!
//! Each managed directory keeps 32 random bytes, hex-encoded, in a `.salt`
//! file next to its data. The salt is not secret. It is written once and
//! never changes, since every key for the directory depends on it.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::error::{DailyError, DailyResult};

use super::key_derivation::SALT_LEN;

/// Salt file name inside a managed directory
pub const SALT_FILE: &str = ".salt";

/// Path of the salt file for a directory
pub fn salt_path(dir: &Path) -> PathBuf {
    dir.join(SALT_FILE)
}

/// Read an existing salt. A missing file is `SaltMissing`.
pub fn read_salt(dir: &Path) -> DailyResult<[u8; SALT_LEN]> {
    let path = salt_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(DailyError::SaltMissing(path)),
        Err(e) => {
            return Err(DailyError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };
    decode_salt(&path, contents.trim())
}

fn decode_salt(path: &Path, encoded: &str) -> DailyResult<[u8; SALT_LEN]> {
    let bytes = hex::decode(encoded).map_err(|e| {
        DailyError::InvalidFormat(format!("Corrupt salt in {}: {}", path.display(), e))
    })?;
    bytes.as_slice().try_into().map_err(|_| {
        DailyError::InvalidFormat(format!(
            "Salt in {} is {} bytes, expected {}",
            path.display(),
            bytes.len(),
            SALT_LEN
        ))
    })
}

/// Read the directory's salt, generating and persisting one on first use.
///
/// Creation uses `create_new`, so a salt written in between the existence
/// check and the write is picked up instead of being overwritten.
pub fn load_or_create_salt(dir: &Path) -> DailyResult<[u8; SALT_LEN]> {
    match read_salt(dir) {
        Ok(salt) => return Ok(salt),
        Err(DailyError::SaltMissing(_)) => {}
        Err(e) => return Err(e),
    }

    fs::create_dir_all(dir).map_err(|e| {
        DailyError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let path = salt_path(dir);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return read_salt(dir),
        Err(e) => {
            return Err(DailyError::Io(format!(
                "Failed to create {}: {}",
                path.display(),
                e
            )))
        }
    };

    file.write_all(hex::encode(salt).as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| DailyError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_salt() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_salt(temp_dir.path());
        assert!(matches!(result, Err(DailyError::SaltMissing(_))));
    }

    #[test]
    fn test_create_then_reuse() {
        let temp_dir = TempDir::new().unwrap();

        let first = load_or_create_salt(temp_dir.path()).unwrap();
        let second = load_or_create_salt(temp_dir.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(read_salt(temp_dir.path()).unwrap(), first);
    }

    #[test]
    fn test_salt_file_is_hex() {
        let temp_dir = TempDir::new().unwrap();
        let salt = load_or_create_salt(temp_dir.path()).unwrap();

        let contents = fs::read_to_string(salt_path(temp_dir.path())).unwrap();
        assert_eq!(contents.len(), SALT_LEN * 2);
        assert_eq!(contents, hex::encode(salt));
    }

    #[test]
    fn test_salts_differ_between_directories() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        assert_ne!(
            load_or_create_salt(a.path()).unwrap(),
            load_or_create_salt(b.path()).unwrap()
        );
    }

    #[test]
    fn test_corrupt_salt_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(salt_path(temp_dir.path()), "not hex").unwrap();
        assert!(matches!(
            read_salt(temp_dir.path()),
            Err(DailyError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_short_salt_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(salt_path(temp_dir.path()), "abcd").unwrap();
        assert!(matches!(
            read_salt(temp_dir.path()),
            Err(DailyError::InvalidFormat(_))
        ));
    }
}
