//! PBKDF2-HMAC-SHA256 key derivation.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EnvelopeError;

/// Byte length of a derived AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Iteration count used by every stored envelope.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// PBKDF2 parameters. The hash is always SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl KdfParams {
    pub fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }
}

/// A 256-bit key derived from the shared secret and an envelope salt.
///
/// Lives for a single encode or decode call. Zeroed on drop, so every exit
/// path (success, authentication failure, early return) wipes it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a [`DerivedKey`] from `secret` and `salt`.
///
/// Identical inputs always produce the identical key.
///
/// # Errors
///
/// Returns [`EnvelopeError::Primitive`] if `params.iterations` is zero or the
/// PBKDF2 implementation rejects its inputs.
pub fn derive_key(secret: &str, salt: &[u8], params: &KdfParams) -> Result<DerivedKey, EnvelopeError> {
    if params.iterations == 0 {
        return Err(EnvelopeError::Primitive("kdf iteration count must be > 0".into()));
    }
    let mut key = DerivedKey {
        bytes: [0u8; KEY_LEN],
    };
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret.as_bytes(), salt, params.iterations, &mut key.bytes)
        .map_err(|e| EnvelopeError::Primitive(format!("pbkdf2: {e}")))?;
    Ok(key)
}
