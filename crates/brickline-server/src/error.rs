//! HTTP error types for the Brickline intake server.
//!
//! Maps intake errors into HTTP responses. Every error produces a JSON body
//! of the form `{ "error": "<message>" }`. Client errors carry the fixed
//! validation message; internal errors are logged and replaced with a
//! generic message so storage details never reach the caller.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use brickline_core::error::{INVALID_PAYLOAD_MESSAGE, SERVER_FAULT_MESSAGE};

/// Message returned when the body exceeds the configured size limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large.";
use brickline_core::{ErrorKind, IntakeError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client sent invalid input. The message is shown to the caller.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Body exceeded the size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal failure. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "registration insert failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_FAULT_MESSAGE.to_owned(),
                )
            }
        };

        (status, axum::Json(ErrorBody { error: message })).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err.kind() {
            ErrorKind::InvalidPayload | ErrorKind::InvalidFields => {
                Self::BadRequest(err.client_message().to_owned())
            }
            ErrorKind::ServerFault => Self::Internal(err.to_string()),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "request body rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_owned())
        } else {
            Self::BadRequest(INVALID_PAYLOAD_MESSAGE.to_owned())
        }
    }
}
