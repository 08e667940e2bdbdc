//! Password-derived authenticated encryption for values stored at rest.
//!
//! An envelope is a single string carrying everything needed to decrypt it,
//! apart from the shared secret:
//!
//! ```text
//! <saltHex>:<ivHex>:<ciphertextHex>:<authTagHex>
//! ```
//!
//! - key: PBKDF2-HMAC-SHA256, 100 000 iterations, 32 bytes
//! - cipher: AES-256-GCM, 12-byte IV, 16-byte tag stored separately
//! - payload: the value serialized as compact JSON
//!
//! ```no_run
//! let envelope = envelope::encode(&serde_json::json!({"a": 1}), "k1")?;
//! let value: serde_json::Value = envelope::decode(&envelope, "k1")?;
//! # Ok::<(), envelope::EnvelopeError>(())
//! ```
//!
//! # Security invariants
//!
//! - Derived keys are zeroed on drop and never logged.
//! - A failed tag check returns [`EnvelopeError::Authentication`] and no bytes.
//! - Malformed envelopes are rejected before any key derivation.

pub mod cipher;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod pool;
pub mod rng;
pub mod salt;
pub mod secret;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use envelope::Envelope;
pub use error::{EnvelopeError, ErrorKind, Field, FormatError};
pub use kdf::{KdfParams, DEFAULT_ITERATIONS};
pub use pool::CryptoPool;
pub use rng::{OsRandom, RandomSource};
pub use salt::SaltScheme;
pub use secret::SharedSecret;

use serde::{de::DeserializeOwned, Serialize};

/// Encode `value` under `secret` with default settings.
pub fn encode<T>(value: &T, secret: &str) -> Result<String, EnvelopeError>
where
    T: Serialize + ?Sized,
{
    Encoder::default().encode(value, secret)
}

/// Decode an envelope produced by [`encode`].
pub fn decode<T>(envelope: &str, secret: &str) -> Result<T, EnvelopeError>
where
    T: DeserializeOwned,
{
    Decoder::default().decode(envelope, secret)
}
