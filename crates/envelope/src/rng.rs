//! Random byte source used for salts and nonces.
//!
//! Randomness is injected into the [`Encoder`](crate::Encoder) as a capability
//! rather than read from a hidden global, so tests can substitute a fixed or
//! failing source.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

use crate::error::EnvelopeError;

/// A cryptographically secure source of random bytes.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Primitive`] if the underlying generator fails.
    fn fill(&self, dest: &mut [u8]) -> Result<(), EnvelopeError>;
}

/// [`RandomSource`] backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), EnvelopeError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EnvelopeError::Primitive(format!("os rng: {e}")))
    }
}

/// Draw a uniformly random `u32` from `rng`.
pub(crate) fn next_u32(rng: &dyn RandomSource) -> Result<u32, EnvelopeError> {
    let mut buf = [0u8; 4];
    rng.fill(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}
