//! HTTP error mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::coach::CoachError;

/// Error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Plain-language message.
    pub error: String,
}

/// Errors a handler can return.
#[derive(Debug)]
pub enum AppError {
    /// The body is not JSON or not the expected shape (400).
    BadRequest(String),
    /// Generation failed (502) or timed out (504).
    Coach(CoachError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CoachError> for AppError {
    fn from(err: CoachError) -> Self {
        Self::Coach(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    "İstek okunamadı. Lütfen mesajını kontrol edip tekrar gönder.".to_owned(),
                )
            }
            AppError::Coach(err) => {
                tracing::error!(error = %err, "turn failed");
                let status = match err {
                    CoachError::Generation(_) => StatusCode::BAD_GATEWAY,
                    CoachError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                };
                (status, err.user_message().to_owned())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
