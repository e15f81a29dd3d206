//! Cryptographic functions for Daily
//!
//! Provides AES-256-GCM encryption with Argon2id key derivation
//! for optional at-rest encryption of workspace data.

pub mod encryption;
pub mod files;
pub mod framing;
pub mod key_derivation;
pub mod marker;
pub mod salt;
pub mod secure_memory;

pub use encryption::{decrypt, decrypt_string, encrypt, encrypt_string};
pub use files::{decrypt_file, decrypt_to_temp_file, encrypt_file};
pub use framing::{is_encrypted, parse, Frame, Framed};
pub use key_derivation::{derive_key, DerivedKey};
pub use marker::is_encryption_enabled;
pub use salt::{load_or_create_salt, read_salt};
pub use secure_memory::SecureString;
