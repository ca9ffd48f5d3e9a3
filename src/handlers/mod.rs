// src/handlers/mod.rs

pub mod checks;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness of the service itself. Never runs probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
