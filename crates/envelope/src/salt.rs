//! Salt generation schemes.

use crate::error::EnvelopeError;
use crate::rng::{next_u32, RandomSource};

/// Smallest salt accepted by [`SaltScheme::random_bytes`].
pub const MIN_RANDOM_SALT_LEN: usize = 16;

/// How the [`Encoder`](crate::Encoder) produces a fresh salt per envelope.
///
/// The decoder does not need to know the scheme: the salt bytes travel in the
/// envelope and are fed to the KDF as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaltScheme {
    /// A random `u32` rendered as decimal ASCII text.
    ///
    /// At most 32 bits of entropy. This is the format of every envelope
    /// already in storage and stays the default so they remain compatible.
    #[default]
    DecimalText,

    /// `n` raw random bytes.
    RandomBytes(usize),
}

impl SaltScheme {
    /// Wide random salt of `len` bytes, clamped up to [`MIN_RANDOM_SALT_LEN`].
    pub fn random_bytes(len: usize) -> Self {
        SaltScheme::RandomBytes(len.max(MIN_RANDOM_SALT_LEN))
    }

    pub fn generate(&self, rng: &dyn RandomSource) -> Result<Vec<u8>, EnvelopeError> {
        match *self {
            SaltScheme::DecimalText => Ok(next_u32(rng)?.to_string().into_bytes()),
            SaltScheme::RandomBytes(len) => {
                let mut salt = vec![0u8; len];
                rng.fill(&mut salt)?;
                Ok(salt)
            }
        }
    }
}

impl std::str::FromStr for SaltScheme {
    type Err = String;

    /// Parses the configuration names `decimal` and `random`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" => Ok(SaltScheme::DecimalText),
            "random" => Ok(SaltScheme::random_bytes(MIN_RANDOM_SALT_LEN)),
            other => Err(format!("unknown salt scheme: {other}")),
        }
    }
}
