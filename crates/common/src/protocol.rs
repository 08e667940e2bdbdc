//! Request and response types exchanged over the envelope service API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Seal endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealRequest {
    /// Arbitrary JSON value to encrypt (typically a mail password string).
    pub value: serde_json::Value,
}

/// Successful response body for `POST /seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealResponse {
    /// `<saltHex>:<ivHex>:<ciphertextHex>:<authTagHex>`
    pub envelope: String,
}

// ---------------------------------------------------------------------------
// Open endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRequest {
    pub envelope: String,
}

/// Successful response body for `POST /open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    /// The value originally passed to `/seal`.
    pub value: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` while at least one crypto worker slot is free, else `"busy"`.
    pub status: String,
    /// PBKDF2 iteration count in use.
    pub kdf_iterations: u32,
    /// Crypto worker slots currently free.
    pub available_permits: usize,
}
