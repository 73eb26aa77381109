use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiResponse, AppState};
use crate::constants::API_VERSION;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub time: String,
    pub api_version: &'static str,
    pub uptime_seconds: u64,
    pub database: bool,
}

/// Liveness probe.
///
/// # Endpoint
/// `GET /api/status`
///
/// Always answers `online`; `database` reports whether a trivial query succeeds.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            false
        }
    };

    Json(ApiResponse::success(StatusResponse {
        status: "online",
        message: "Pet shop API server is running",
        time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        api_version: API_VERSION,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    }))
}
