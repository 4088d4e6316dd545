//! API route definitions.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found. See /health, /dataset/info, /dataset/split, /dataset/transform.",
        })),
    )
}

/// Create the application router.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/dataset/info", post(handlers::dataset_info))
        .route("/dataset/split", post(handlers::dataset_split))
        .route("/dataset/transform", post(handlers::dataset_transform))
        .fallback(handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
