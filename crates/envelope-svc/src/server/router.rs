//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};

use super::{
    handlers,
    middleware::{self, Limits},
    state::AppState,
};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, limits: Limits) -> Router {
    let routes = Router::new()
        .route("/seal", post(handlers::seal))
        .route("/open", post(handlers::open))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found);
    middleware::apply(routes, limits).with_state(state)
}
