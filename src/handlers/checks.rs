// src/handlers/checks.rs

use crate::{
    check::{CheckResult, MeasurementPoint, ResultHistory},
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct MeasurementSeries {
    pub probe: String,
    pub points: Vec<MeasurementPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebugMode {
    pub enabled: bool,
}

/// Runs (or replays) the probe sweep and returns the whole history.
#[axum::debug_handler]
pub async fn list_checks(State(state): State<Arc<AppState>>) -> Result<Json<ResultHistory>> {
    let history = state.checks.check().await?;
    Ok(Json(history))
}

/// Latest sweep. 503 when any probe failed so the route can back a readiness check.
#[axum::debug_handler]
pub async fn latest_check(State(state): State<Arc<AppState>>) -> Result<Response> {
    let history = state.checks.check().await?;
    latest_response(&history)
}

/// Drops the memoized sweep and runs the probes again.
#[axum::debug_handler]
pub async fn refresh_checks(State(state): State<Arc<AppState>>) -> Result<Response> {
    info!("Received request to refresh probe results.");
    state.checks.forget().await?;
    let history = state.checks.check().await?;
    latest_response(&history)
}

/// Numeric readings of one probe across the stored history, oldest first.
#[axum::debug_handler]
pub async fn probe_measurements(
    State(state): State<Arc<AppState>>,
    Path(probe): Path<String>,
) -> Result<Json<MeasurementSeries>> {
    let history = state.checks.history().await?;
    let points = history.measurements(&probe);
    Ok(Json(MeasurementSeries { probe, points }))
}

#[axum::debug_handler]
pub async fn get_debug_mode(State(state): State<Arc<AppState>>) -> Json<DebugMode> {
    Json(DebugMode {
        enabled: state.checks.debug_mode(),
    })
}

#[axum::debug_handler]
pub async fn set_debug_mode(
    State(state): State<Arc<AppState>>,
    Json(mode): Json<DebugMode>,
) -> Json<DebugMode> {
    state.checks.set_debug_mode(mode.enabled);
    Json(mode)
}

fn latest_response(history: &ResultHistory) -> Result<Response> {
    let latest: &CheckResult = history
        .latest()
        .ok_or_else(|| AppError::NotFound("no check results recorded".to_string()))?;

    let status = if latest.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(latest.clone())).into_response())
}
