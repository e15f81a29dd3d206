//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for data at rest using AES-256-GCM.
//! Each encryption operation generates a unique nonce, and output is always a
//! complete [`Frame`](super::framing::Frame) buffer.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Nonce, Tag,
};

use crate::error::{DailyError, DailyResult};

use super::framing::{Frame, NONCE_LEN, TAG_LEN};
use super::DerivedKey;

fn cipher(key: &DerivedKey) -> DailyResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| DailyError::Encryption(format!("Failed to create cipher: {}", e)))
}

/// Encrypt plaintext into a framed buffer.
///
/// Generates a random nonce for each call, so encrypting the same plaintext
/// twice never yields the same bytes.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> DailyResult<Vec<u8>> {
    let cipher = cipher(key)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce_bytes), b"", &mut buffer)
        .map_err(|e| DailyError::Encryption(format!("Encryption failed: {}", e)))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(Frame::assemble(&nonce_bytes, &tag_bytes, &buffer))
}

/// Decrypt a framed buffer.
///
/// Fails with `InvalidFormat` for short or untagged input and with
/// `AuthenticationFailed` when the tag does not verify. No plaintext is
/// returned unless authentication succeeds.
pub fn decrypt(framed: &[u8], key: &DerivedKey) -> DailyResult<Vec<u8>> {
    let frame = Frame::parse(framed)?;
    let cipher = cipher(key)?;

    let mut buffer = frame.ciphertext().to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(frame.nonce()),
            b"",
            &mut buffer,
            Tag::from_slice(frame.tag()),
        )
        .map_err(|_| DailyError::AuthenticationFailed)?;

    Ok(buffer)
}

/// Encrypt a string
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> DailyResult<Vec<u8>> {
    encrypt(plaintext.as_bytes(), key)
}

/// Decrypt to a string
pub fn decrypt_string(framed: &[u8], key: &DerivedKey) -> DailyResult<String> {
    let plaintext = decrypt(framed, key)?;
    String::from_utf8(plaintext)
        .map_err(|e| DailyError::Encryption(format!("Invalid UTF-8 in decrypted data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::framing::{is_encrypted, HEADER_LEN, MAGIC_LEN};

    fn test_key() -> DerivedKey {
        DerivedKey::from_bytes([0x42; 32])
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let encrypted = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_encrypt_decrypt_string() {
        let key = test_key();
        let plaintext = "{\"todos\":[]}";

        let encrypted = encrypt_string(plaintext, &key).unwrap();
        let decrypted = decrypt_string(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_output_is_framed() {
        let key = test_key();
        let encrypted = encrypt(b"abc", &key).unwrap();

        assert!(is_encrypted(&encrypted));
        assert_eq!(encrypted.len(), HEADER_LEN + 3);
    }

    #[test]
    fn test_different_nonces() {
        let key = test_key();
        let plaintext = b"Hello, World!";

        let encrypted1 = encrypt(plaintext, &key).unwrap();
        let encrypted2 = encrypt(plaintext, &key).unwrap();

        // Same plaintext should produce different output (different nonces)
        assert_ne!(encrypted1, encrypted2);
        assert_ne!(
            encrypted1[MAGIC_LEN..MAGIC_LEN + NONCE_LEN],
            encrypted2[MAGIC_LEN..MAGIC_LEN + NONCE_LEN]
        );
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = test_key();
        let key2 = DerivedKey::from_bytes([0x43; 32]);

        let encrypted = encrypt(b"Hello, World!", &key1).unwrap();

        let result = decrypt(&encrypted, &key2);
        assert!(matches!(result, Err(DailyError::AuthenticationFailed)));
    }

    #[test]
    fn test_any_flipped_byte_after_magic_fails() {
        let key = test_key();
        let encrypted = encrypt(b"Hello, World!", &key).unwrap();

        for i in MAGIC_LEN..encrypted.len() {
            let mut tampered = encrypted.clone();
            tampered[i] ^= 0x01;
            let result = decrypt(&tampered, &key);
            assert!(
                matches!(result, Err(DailyError::AuthenticationFailed)),
                "byte {} flip was not detected",
                i
            );
        }
    }

    #[test]
    fn test_flipped_magic_is_invalid_format() {
        let key = test_key();
        let mut encrypted = encrypt(b"Hello", &key).unwrap();
        encrypted[3] ^= 0xFF;

        assert!(matches!(
            decrypt(&encrypted, &key),
            Err(DailyError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_short_buffer_is_invalid_format() {
        let key = test_key();
        let result = decrypt(b"DAILY_ENC_V1 too short", &key);
        assert!(matches!(result, Err(DailyError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let plaintext = b"";

        let encrypted = encrypt(plaintext, &key).unwrap();
        assert_eq!(encrypted.len(), HEADER_LEN);
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted.as_slice());
    }

    #[test]
    fn test_large_plaintext() {
        let key = test_key();
        let plaintext: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();

        let encrypted = encrypt(&plaintext, &key).unwrap();
        let decrypted = decrypt(&encrypted, &key).unwrap();

        assert_eq!(plaintext, decrypted);
    }
}
