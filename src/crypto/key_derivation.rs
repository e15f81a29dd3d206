//! Key derivation using Argon2id
//!
//! Derives encryption keys from user passphrases using Argon2id,
//! a memory-hard key derivation function resistant to GPU/ASIC attacks.
//! The cost parameters are fixed: changing them would make every existing
//! workspace undecryptable, so they move only together with the magic tag.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{DailyError, DailyResult};

/// Memory cost in KiB (64 MiB)
pub const MEMORY_COST_KIB: u32 = 64 * 1024;

/// Time cost (iterations)
pub const TIME_COST: u32 = 3;

/// Parallelism degree
pub const PARALLELISM: u32 = 1;

/// Length of the derived key (AES-256)
pub const KEY_LEN: usize = 32;

/// Length of the per-directory salt
pub const SALT_LEN: usize = 32;

/// A derived encryption key, zeroed on drop
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

fn argon2() -> DailyResult<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| DailyError::Encryption(format!("Invalid Argon2 parameters: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Derive an encryption key from a passphrase and a directory salt.
///
/// Same passphrase + salt always yields the same key.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> DailyResult<DerivedKey> {
    let mut key = [0u8; KEY_LEN];
    argon2()?
        .hash_password_into(passphrase.as_bytes(), salt, &mut key)
        .map_err(|e| DailyError::Encryption(format!("Key derivation failed: {}", e)))?;

    let derived = DerivedKey::from_bytes(key);
    key.zeroize();
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT_A: [u8; SALT_LEN] = [7u8; SALT_LEN];
    const SALT_B: [u8; SALT_LEN] = [9u8; SALT_LEN];

    #[test]
    fn test_derive_key() {
        let key = derive_key("test_passphrase", &SALT_A).unwrap();
        assert_eq!(key.as_bytes().len(), KEY_LEN);
    }

    #[test]
    fn test_same_passphrase_same_key() {
        let key1 = derive_key("test_passphrase", &SALT_A).unwrap();
        let key2 = derive_key("test_passphrase", &SALT_A).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let key1 = derive_key("passphrase1", &SALT_A).unwrap();
        let key2 = derive_key("passphrase2", &SALT_A).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_passphrase", &SALT_A).unwrap();
        let key2 = derive_key("same_passphrase", &SALT_B).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = DerivedKey::from_bytes([0xAB; KEY_LEN]);
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.to_lowercase().contains("ab, ab"));
    }
}
