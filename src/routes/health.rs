//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub scoring_config: String,
    pub module_weights: usize,
    pub kri_definitions: usize,
}

/// Liveness probe: always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe: reports which scoring configuration is in effect.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let scoring = &state.config.scoring;
    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        scoring_config: state
            .config
            .scoring_config_path
            .clone()
            .unwrap_or_else(|| "defaults".to_string()),
        module_weights: scoring.module_weights.len(),
        kri_definitions: scoring.kri_thresholds.len(),
    })
}
