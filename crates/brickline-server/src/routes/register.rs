//! Registration route.
//!
//! - `POST /api/register` — validate and persist one lead registration

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Acknowledgement returned for an accepted registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Build the register router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/register", post(register))
}

/// `POST /api/register` — append one registration row.
///
/// The body is taken as raw bytes so malformed JSON is reported with the
/// same message as any other schema failure. Body read failures, including
/// the size limit, also answer with a JSON error.
async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let body = body?;
    state.intake.register(&body).await?;
    Ok(Json(RegisterResponse { ok: true }))
}
