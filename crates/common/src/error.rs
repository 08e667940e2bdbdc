//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::AuthenticationFailed`] → 422
/// - [`ServiceError::InvalidPayload`] → 422
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request or the envelope it carries is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The envelope did not authenticate under the configured secret.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The envelope authenticated but its payload is not the expected JSON,
    /// or the submitted value could not be serialised.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A cryptographic primitive or worker failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::AuthenticationFailed => 422,
            ServiceError::InvalidPayload(_) => 422,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for the error response body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::AuthenticationFailed => "authentication_failed",
            ServiceError::InvalidPayload(_) => "invalid_payload",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
