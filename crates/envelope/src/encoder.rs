//! Envelope encoding: value + secret → envelope string.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{self, NONCE_LEN};
use crate::envelope::Envelope;
use crate::error::EnvelopeError;
use crate::kdf::{derive_key, KdfParams};
use crate::rng::{OsRandom, RandomSource};
use crate::salt::SaltScheme;

/// Produces envelopes under a shared secret.
///
/// Holds only immutable settings and a shared [`RandomSource`], so one
/// instance can serve any number of threads.
#[derive(Clone)]
pub struct Encoder {
    rng: Arc<dyn RandomSource>,
    kdf: KdfParams,
    salt: SaltScheme,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Arc::new(OsRandom))
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("kdf", &self.kdf)
            .field("salt", &self.salt)
            .finish_non_exhaustive()
    }
}

impl Encoder {
    /// Encoder with default KDF parameters and the decimal-text salt scheme.
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self {
            rng,
            kdf: KdfParams::default(),
            salt: SaltScheme::default(),
        }
    }

    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn with_salt_scheme(mut self, salt: SaltScheme) -> Self {
        self.salt = salt;
        self
    }

    /// Serialize `value` as JSON and seal it into an envelope string.
    ///
    /// Two calls with identical arguments return different strings.
    ///
    /// # Errors
    ///
    /// - [`EnvelopeError::Encoding`] if `value` cannot be serialized.
    /// - [`EnvelopeError::Primitive`] if the RNG, KDF, or cipher fails.
    pub fn encode<T>(&self, value: &T, secret: &str) -> Result<String, EnvelopeError>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = Zeroizing::new(serde_json::to_vec(value)?);
        Ok(self.seal(&plaintext, secret)?.to_string())
    }

    /// Seal raw plaintext bytes.
    pub fn seal(&self, plaintext: &[u8], secret: &str) -> Result<Envelope, EnvelopeError> {
        let salt = self.salt.generate(self.rng.as_ref())?;
        let mut iv = [0u8; NONCE_LEN];
        self.rng.fill(&mut iv)?;

        let key = derive_key(secret, &salt, &self.kdf)?;
        let sealed = cipher::seal(&key, &iv, plaintext)?;

        debug!(
            salt_len = salt.len(),
            ciphertext_len = sealed.ciphertext.len(),
            "envelope sealed"
        );
        Ok(Envelope {
            salt,
            iv,
            ciphertext: sealed.ciphertext,
            tag: sealed.tag,
        })
    }
}
