//! Error types produced by the envelope layer.

use thiserror::Error;

/// Envelope field names, used to report which part of a malformed envelope
/// was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Salt,
    Iv,
    Ciphertext,
    AuthTag,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Salt => "salt",
            Field::Iv => "iv",
            Field::Ciphertext => "ciphertext",
            Field::AuthTag => "authTag",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural problems detected while parsing an envelope string.
///
/// All of these are found before any key derivation or decryption runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The envelope did not split into exactly four `:`-separated fields.
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    /// A field is not even-length lowercase hex.
    #[error("{field} is not valid lowercase hex")]
    InvalidHex { field: Field },

    /// A fixed-size field decoded to the wrong number of bytes.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        field: Field,
        expected: usize,
        actual: usize,
    },
}

/// Top-level error type for envelope encoding and decoding.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The envelope string is malformed.
    #[error("malformed envelope: {0}")]
    Format(#[from] FormatError),

    /// Tag verification failed: wrong secret or a modified envelope.
    ///
    /// Carries no detail so callers cannot learn which part was wrong.
    #[error("authentication failed")]
    Authentication,

    /// The value could not be serialized, or the decrypted bytes are not the
    /// expected UTF-8 JSON.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The RNG, KDF, cipher, or worker pool failed. Never retried.
    #[error("cryptographic primitive failed: {0}")]
    Primitive(String),
}

/// Stable, low-cardinality label for an [`EnvelopeError`], safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Authentication,
    Encoding,
    Primitive,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Format => "format",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Primitive => "primitive",
        }
    }
}

impl EnvelopeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvelopeError::Format(_) => ErrorKind::Format,
            EnvelopeError::Authentication => ErrorKind::Authentication,
            EnvelopeError::Encoding(_) => ErrorKind::Encoding,
            EnvelopeError::Primitive(_) => ErrorKind::Primitive,
        }
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        EnvelopeError::Encoding(err.to_string())
    }
}
