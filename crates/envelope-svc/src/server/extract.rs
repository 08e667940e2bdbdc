//! JSON body extractor whose rejections use the service error shape.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::ErrorResponse;
use tracing::debug;

/// Drop-in for [`axum::Json`] on request bodies.
///
/// A missing content type, unparsable JSON, a body that does not match the
/// request type, or an oversized body all answer with `{ "code", "message" }`
/// instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BodyRejection))]
pub struct ApiJson<T>(pub T);

/// A rejected request body.
#[derive(Debug)]
pub struct BodyRejection(JsonRejection);

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl BodyRejection {
    fn code(&self) -> &'static str {
        match self.0.status() {
            StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
            _ => "bad_request",
        }
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let status = self.0.status();
        debug!(status = status.as_u16(), "request body rejected");
        let body = ErrorResponse::new(self.code(), self.0.body_text());
        (status, Json(body)).into_response()
    }
}
