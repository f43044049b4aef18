//! HTTP error contract.
//!
//! The body is always `{"code": "...", "message": "..."}` with a generic
//! message; the underlying cause stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::SmorfiaError;

#[derive(Debug)]
pub struct AppError(pub SmorfiaError);

impl From<SmorfiaError> for AppError {
    fn from(e: SmorfiaError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({
            "code": self.0.code(),
            "message": self.0.public_message(),
        });
        (status, Json(body)).into_response()
    }
}
