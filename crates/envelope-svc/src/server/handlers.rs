//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    ErrorResponse, HealthResponse, OpenRequest, OpenResponse, SealRequest, SealResponse,
};
use common::ServiceError;
use envelope::EnvelopeError;
use serde_json::Value;
use tracing::warn;

use super::extract::ApiJson;
use super::state::AppState;

/// `POST /seal` — encrypt `value` into an envelope string.
pub async fn seal(State(state): State<AppState>, ApiJson(req): ApiJson<SealRequest>) -> Response {
    match state.pool.encode(req.value, &state.secret).await {
        Ok(envelope) => (StatusCode::OK, Json(SealResponse { envelope })).into_response(),
        Err(e) => envelope_error(e),
    }
}

/// `POST /open` — authenticate and decrypt an envelope.
pub async fn open(State(state): State<AppState>, ApiJson(req): ApiJson<OpenRequest>) -> Response {
    match state.pool.decode::<Value>(req.envelope, &state.secret).await {
        Ok(value) => (StatusCode::OK, Json(OpenResponse { value })).into_response(),
        Err(e) => envelope_error(e),
    }
}

/// `GET /health` — liveness check with crypto pool headroom.
pub async fn health(State(state): State<AppState>) -> Response {
    let available_permits = state.pool.available_permits();
    let body = HealthResponse {
        status: if available_permits > 0 { "ok" } else { "busy" }.into(),
        kdf_iterations: state.pool.decoder().kdf().iterations,
        available_permits,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Map an [`EnvelopeError`] onto the service error taxonomy.
///
/// Authentication failures carry no detail. Primitive failures are logged
/// here and replaced with a generic message.
fn to_service_error(err: EnvelopeError) -> ServiceError {
    match err {
        EnvelopeError::Format(e) => ServiceError::BadRequest(e.to_string()),
        EnvelopeError::Authentication => ServiceError::AuthenticationFailed,
        EnvelopeError::Encoding(msg) => ServiceError::InvalidPayload(msg),
        EnvelopeError::Primitive(msg) => {
            warn!(error = %msg, "cryptographic primitive failed");
            ServiceError::Internal("envelope operation failed".into())
        }
    }
}

fn envelope_error(err: EnvelopeError) -> Response {
    let err = to_service_error(err);
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.code(), err.to_string()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::testing;
    use axum::routing::{get, post};
    use axum::Router;
    use axum_test::TestServer;
    use envelope::FormatError;
    use serde_json::json;

    fn test_server() -> TestServer {
        let app = Router::new()
            .route("/seal", post(seal))
            .route("/open", post(open))
            .route("/health", get(health))
            .with_state(testing::state());
        TestServer::new(app).unwrap()
    }

    async fn sealed(server: &TestServer, value: Value) -> String {
        let resp = server.post("/seal").json(&json!({ "value": value })).await;
        resp.assert_status_ok();
        resp.json::<SealResponse>().envelope
    }

    #[tokio::test]
    async fn seal_then_open_returns_value() {
        let server = test_server();
        let envelope = sealed(&server, json!("smtp-password")).await;
        assert_eq!(envelope.split(':').count(), 4);

        let resp = server.post("/open").json(&json!({ "envelope": envelope })).await;
        resp.assert_status_ok();
        assert_eq!(resp.json::<OpenResponse>().value, json!("smtp-password"));
    }

    #[tokio::test]
    async fn malformed_envelope_is_400() {
        let server = test_server();
        let resp = server.post("/open").json(&json!({ "envelope": "ab:cd" })).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body = resp.json::<ErrorResponse>();
        assert_eq!(body.code, "bad_request");
        assert!(body.message.contains("4 fields"), "got: {}", body.message);
    }

    #[tokio::test]
    async fn tampered_envelope_is_422_without_detail() {
        let server = test_server();
        let mut envelope = sealed(&server, json!({"a": 1})).await;
        let last = envelope.pop().unwrap();
        envelope.push(if last == '0' { '1' } else { '0' });

        let resp = server.post("/open").json(&json!({ "envelope": envelope })).await;
        resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = resp.json::<ErrorResponse>();
        assert_eq!(body.code, "authentication_failed");
        assert_eq!(body.message, "authentication failed");
    }

    #[tokio::test]
    async fn health_reports_iterations_and_permits() {
        let server = test_server();
        let resp = server.get("/health").await;
        resp.assert_status_ok();
        let body = resp.json::<HealthResponse>();
        assert_eq!(body.status, "ok");
        assert_eq!(body.kdf_iterations, 1_000);
        assert_eq!(body.available_permits, 2);
    }

    #[tokio::test]
    async fn open_without_envelope_field_is_json_error() {
        let server = test_server();
        let resp = server.post("/open").json(&json!({ "value": "x" })).await;
        resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = resp.json::<ErrorResponse>();
        assert_eq!(body.code, "bad_request");
        assert!(body.message.contains("envelope"), "got: {}", body.message);
    }

    #[test]
    fn primitive_failure_hides_detail() {
        let err = to_service_error(EnvelopeError::Primitive("os rng: unavailable".into()));
        assert_eq!(err.http_status(), 500);
        assert!(!err.to_string().contains("os rng"));
    }

    #[test]
    fn format_error_maps_to_bad_request() {
        let err = to_service_error(FormatError::FieldCount(3).into());
        assert_eq!(err.http_status(), 400);
    }
}
