//! KRI routes: traffic-light status for submitted readings.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::kri::{Kri, KriReading};
use crate::services::kri::{self, KriResult, KriStatusCounts};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct KriStatusRequest {
    pub kris: Vec<KriReading>,
}

/// Classified readings plus per-status totals.
#[derive(Debug, Serialize)]
pub struct KriStatusReport {
    pub results: Vec<KriResult>,
    pub counts: KriStatusCounts,
}

/// POST /api/v1/kris/status: classify readings against inline or configured thresholds.
pub async fn status(
    State(state): State<AppState>,
    Json(body): Json<KriStatusRequest>,
) -> Result<Json<ApiResponse<KriStatusReport>>, AppError> {
    let mut resolved: Vec<Kri> = Vec::with_capacity(body.kris.len());
    for reading in &body.kris {
        reading
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        resolved.push(kri::resolve_reading(reading, &state.config.scoring)?);
    }

    let (results, counts) = kri::evaluate_all(&resolved);
    tracing::debug!(
        kris = results.len(),
        red = counts.red,
        "Classified KRI readings"
    );
    Ok(ApiResponse::success(KriStatusReport { results, counts }))
}
