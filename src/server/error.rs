//! Error mapping at the HTTP boundary.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::PrepError;

/// Errors surfaced to API clients.
///
/// Validation problems come back as 400s with detail; anything that fails
/// during dataset construction, splitting, or transforming is logged with
/// detail and reported generically as a 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Processing(#[from] PrepError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Processing(err) => {
                tracing::error!(detail = %err, "dataset processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "dataset processing failed".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
