//! Risk routes: residual severity and the inherent/residual heat map.

use axum::Json;
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::risk::Risk;
use crate::services::risk_matrix::{self, HeatMap, RiskAssessment};

/// Request body carrying a list of risks with their controls.
#[derive(Debug, Deserialize)]
pub struct RisksRequest {
    pub risks: Vec<Risk>,
}

/// POST /api/v1/risks/residual: residual severity for every submitted risk.
pub async fn residual(
    Json(body): Json<RisksRequest>,
) -> Result<Json<ApiResponse<Vec<RiskAssessment>>>, AppError> {
    let assessments = risk_matrix::assess_all(&body.risks)?;
    tracing::debug!(risks = assessments.len(), "Computed residual severities");
    Ok(ApiResponse::success(assessments))
}

/// POST /api/v1/risks/heatmap: risk counts by (inherent, residual) cell.
pub async fn heatmap(
    Json(body): Json<RisksRequest>,
) -> Result<Json<ApiResponse<HeatMap>>, AppError> {
    let assessments = risk_matrix::assess_all(&body.risks)?;
    Ok(ApiResponse::success(risk_matrix::heat_map(&assessments)))
}
