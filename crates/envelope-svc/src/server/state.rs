//! Shared application state injected into every Axum handler.

use envelope::{CryptoPool, SharedSecret};

/// Application state shared across all request handlers.
///
/// Both fields are cheap to clone, so Axum can clone the state per request.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Bounded pool running encode/decode off the async executor.
    pub pool: CryptoPool,
    /// Secret all envelopes are sealed under.
    pub secret: SharedSecret,
}

impl AppState {
    pub fn new(pool: CryptoPool, secret: SharedSecret) -> Self {
        Self { pool, secret }
    }
}
