//! AES-256-GCM encryption with a detached authentication tag.
//!
//! **Nonce uniqueness:** GCM nonce reuse under the same key breaks both
//! confidentiality and authentication. Every envelope derives a fresh key from
//! a fresh salt and draws a fresh 96-bit nonce, so a (key, nonce) pair is never
//! reused in practice.

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Nonce, Tag,
};

use crate::error::EnvelopeError;
use crate::kdf::DerivedKey;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of a GCM authentication tag.
pub const TAG_LEN: usize = 16;

/// Ciphertext and tag produced by [`seal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Same length as the plaintext.
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` under `key` and `nonce`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Primitive`] if the AEAD implementation fails
/// (only reachable for plaintexts beyond the GCM length limit).
pub fn seal(key: &DerivedKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Sealed, EnvelopeError> {
    let cipher = build_cipher(key)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|_| EnvelopeError::Primitive("aes-gcm encryption failed".into()))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_slice());
    Ok(Sealed {
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// On failure the scratch buffer is dropped without being returned, so no
/// unauthenticated plaintext ever reaches the caller.
///
/// # Errors
///
/// Returns [`EnvelopeError::Authentication`] if the tag does not verify.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>, EnvelopeError> {
    let cipher = build_cipher(key)?;
    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer, Tag::from_slice(tag))
        .map_err(|_| EnvelopeError::Authentication)?;
    Ok(buffer)
}

fn build_cipher(key: &DerivedKey) -> Result<Aes256Gcm, EnvelopeError> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| EnvelopeError::Primitive("invalid aes-256 key length".into()))
}
