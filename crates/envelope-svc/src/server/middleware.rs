//! Layers wrapped around every route.

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::state::AppState;

/// Largest request body accepted by the JSON extractors.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Per-request limits, taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Covers queueing behind a full crypto pool plus one PBKDF2 run.
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Limits {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

/// Attach body limit, tracing, timeout and compression to `router`.
pub fn apply(router: Router<AppState>, limits: Limits) -> Router<AppState> {
    router
        .layer(DefaultBodyLimit::max(limits.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(CompressionLayer::new())
}
