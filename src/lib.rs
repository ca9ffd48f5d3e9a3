// src/lib.rs

//! Probe orchestration for health monitoring.
//!
//! A [`ResultCache`] runs the registered probes through a [`ProbeRunner`],
//! memoizes the classified [`CheckResult`] for a short window and keeps a
//! bounded, newest-first [`ResultHistory`] in an injected [`CacheStore`].

pub mod cache;
pub mod check;
pub mod config;
pub mod error;
pub mod handlers;
pub mod probe;
pub mod server;
pub mod state;
pub mod storage;
pub mod telemetry;

use crate::handlers::{checks, health_check};
use axum::{
    body::Body,
    http::{HeaderValue, Request as AxumRequest},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::{path::Path, sync::Arc, time::Instant};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

pub use cache::{Computed, ResultCache};
pub use check::{CheckResult, ProbeRunner, ResultHistory};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use probe::{Measurement, Probe, ProbeError, ProbeOutcome, ProbeRegistry, StaticRegistry};
pub use server::serve;
pub use state::AppState;
pub use storage::{CacheStore, InMemoryStore};

/// Creates the Axum router exposing health and check routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/checks", get(checks::list_checks))
        .route("/checks/latest", get(checks::latest_check))
        .route("/checks/refresh", post(checks::refresh_checks))
        .route(
            "/checks/probes/:probe/measurements",
            get(checks::probe_measurements),
        )
        .route(
            "/checks/debug",
            get(checks::get_debug_mode).put(checks::set_debug_mode),
        )
        .layer(axum::middleware::from_fn(trace_requests))
        .with_state(state)
}

/// Adds a request id and a tracing span around every request.
async fn trace_requests(mut req: AxumRequest<Body>, next: axum::middleware::Next) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        http.method = %method,
        url.path = %path,
    );

    req.extensions_mut().insert(request_id);

    async move {
        let mut response = next.run(req).await;
        let elapsed = start_time.elapsed();

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("X-Request-ID", value);
        }

        info!(
            http.response.duration = ?elapsed,
            http.status_code = response.status().as_u16(),
            "Finished processing request"
        );

        response
    }
    .instrument(span)
    .await
}

/// Loads configuration, builds the shared state and returns the router.
///
/// The host supplies the probes and hands the router to [`serve`].
pub async fn run(
    config_path: &Path,
    registry: Arc<dyn ProbeRegistry>,
) -> std::result::Result<(Router, AppConfig), AppError> {
    let app_config = config::load_config(config_path).map_err(|e| {
        error!(
            config.path = %config_path.display(),
            error = ?e,
            "Failed to load or validate configuration."
        );
        e
    })?;

    info!(
        config.path = %config_path.display(),
        checks.debug = app_config.checks.debug,
        checks.result_ttl_secs = app_config.checks.result_ttl_secs,
        checks.history_limit = app_config.checks.history_limit,
        "Configuration loaded and validated successfully."
    );

    let state = AppState::new(&app_config, registry).await.map_err(|e| {
        error!(error = ?e, "Failed to initialize application state.");
        e
    })?;

    Ok((create_router(Arc::new(state)), app_config))
}
