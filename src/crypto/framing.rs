//! On-disk ciphertext framing
//!
//! Encrypted files are laid out at fixed offsets with no length prefix:
//!
//! ```text
//! magic (12) | nonce (12) | tag (16) | ciphertext (rest)
//! ```
//!
//! Format detection only looks at the magic tag, so anything that does not
//! start with it is treated as legacy plaintext rather than an error.

use crate::error::{DailyError, DailyResult};

/// Magic tag prefixed to every encrypted file
pub const MAGIC: &[u8; MAGIC_LEN] = b"DAILY_ENC_V1";

/// Length of the magic tag
pub const MAGIC_LEN: usize = 12;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Fixed header length; the smallest valid frame (empty payload)
pub const HEADER_LEN: usize = MAGIC_LEN + NONCE_LEN + TAG_LEN;

/// Returns true iff the buffer begins with the exact magic tag
pub fn is_encrypted(buffer: &[u8]) -> bool {
    buffer.len() >= MAGIC_LEN && &buffer[..MAGIC_LEN] == MAGIC
}

/// A buffer classified by its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framed<'a> {
    /// No magic tag; the bytes are used as-is
    Plaintext(&'a [u8]),
    /// A structurally valid ciphertext frame
    Encrypted(Frame<'a>),
}

/// Classify a buffer as plaintext or encrypted.
///
/// Only a buffer that carries the magic tag and is long enough to hold a full
/// header is a frame. Anything shorter is plaintext here, even if it starts
/// with the magic; `decrypt` still rejects it as `InvalidFormat`.
pub fn parse(buffer: &[u8]) -> Framed<'_> {
    match Frame::parse(buffer) {
        Ok(frame) => Framed::Encrypted(frame),
        Err(_) => Framed::Plaintext(buffer),
    }
}

/// A borrowed view over a ciphertext frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    nonce: &'a [u8; NONCE_LEN],
    tag: &'a [u8; TAG_LEN],
    ciphertext: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Validate and split a frame. Too short or wrong magic is `InvalidFormat`.
    pub fn parse(buffer: &'a [u8]) -> DailyResult<Self> {
        if buffer.len() < HEADER_LEN {
            return Err(DailyError::InvalidFormat(format!(
                "expected at least {} bytes, got {}",
                HEADER_LEN,
                buffer.len()
            )));
        }
        if !is_encrypted(buffer) {
            return Err(DailyError::InvalidFormat("magic tag mismatch".to_string()));
        }

        let (nonce, rest) = buffer[MAGIC_LEN..].split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        // The split lengths are exact, so these conversions cannot fail.
        let nonce = nonce
            .try_into()
            .map_err(|_| DailyError::InvalidFormat("bad nonce length".to_string()))?;
        let tag = tag
            .try_into()
            .map_err(|_| DailyError::InvalidFormat("bad tag length".to_string()))?;

        Ok(Self {
            nonce,
            tag,
            ciphertext,
        })
    }

    pub fn nonce(&self) -> &'a [u8; NONCE_LEN] {
        self.nonce
    }

    pub fn tag(&self) -> &'a [u8; TAG_LEN] {
        self.tag
    }

    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }

    /// Serialize parts into a fresh frame buffer
    pub fn assemble(nonce: &[u8; NONCE_LEN], tag: &[u8; TAG_LEN], ciphertext: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(nonce);
        out.extend_from_slice(tag);
        out.extend_from_slice(ciphertext);
        out
    }

    /// Re-serialize this frame
    pub fn to_bytes(&self) -> Vec<u8> {
        Self::assemble(self.nonce, self.tag, self.ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Vec<u8> {
        Frame::assemble(&[1u8; NONCE_LEN], &[2u8; TAG_LEN], b"payload")
    }

    #[test]
    fn test_magic_is_twelve_ascii_bytes() {
        assert_eq!(MAGIC.len(), 12);
        assert_eq!(HEADER_LEN, 40);
    }

    #[test]
    fn test_is_encrypted_short_buffer() {
        assert!(!is_encrypted(b""));
        assert!(!is_encrypted(b"DAILY_ENC_V"));
    }

    #[test]
    fn test_is_encrypted_mismatched_magic() {
        assert!(!is_encrypted(b"{\"todos\":[]}"));
        assert!(!is_encrypted(b"DAILY_ENC_V2 and more bytes follow here"));
    }

    #[test]
    fn test_is_encrypted_exact_magic() {
        assert!(is_encrypted(b"DAILY_ENC_V1"));
        assert!(is_encrypted(&sample_frame()));
    }

    #[test]
    fn test_parse_plaintext() {
        let buffer = b"# hello";
        assert_eq!(parse(buffer), Framed::Plaintext(&buffer[..]));
    }

    #[test]
    fn test_parse_encrypted_splits_fields() {
        let bytes = sample_frame();
        match parse(&bytes) {
            Framed::Encrypted(frame) => {
                assert_eq!(frame.nonce(), &[1u8; NONCE_LEN]);
                assert_eq!(frame.tag(), &[2u8; TAG_LEN]);
                assert_eq!(frame.ciphertext(), b"payload");
                assert_eq!(frame.to_bytes(), bytes);
            }
            Framed::Plaintext(_) => panic!("expected an encrypted frame"),
        }
    }

    #[test]
    fn test_parse_short_buffer_with_magic_is_plaintext() {
        let bytes = sample_frame();
        let short = &bytes[..HEADER_LEN - 1];

        assert!(is_encrypted(short));
        assert_eq!(parse(short), Framed::Plaintext(short));
        assert_eq!(parse(b"DAILY_ENC_V1 idea"), Framed::Plaintext(b"DAILY_ENC_V1 idea"));
        assert!(matches!(Frame::parse(short), Err(DailyError::InvalidFormat(_))));
    }

    #[test]
    fn test_frame_parse_rejects_wrong_magic() {
        let mut bytes = sample_frame();
        bytes[0] = b'X';
        assert!(matches!(Frame::parse(&bytes), Err(DailyError::InvalidFormat(_))));
    }

    #[test]
    fn test_frame_with_empty_payload() {
        let bytes = Frame::assemble(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"");
        let frame = Frame::parse(&bytes).unwrap();
        assert!(frame.ciphertext().is_empty());
    }
}
