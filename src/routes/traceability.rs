//! Traceability routes: requirement-to-risk and risk-to-requirement lookups.

use axum::{extract::Path, Json};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::snapshot::TenantSnapshot;
use crate::services::traceability::{self, RequirementTrace, RiskTrace};

/// POST /api/v1/traceability/requirements/{code}: risks, controls and evidence for a requirement.
pub async fn requirement(
    Path(code): Path<String>,
    Json(snapshot): Json<TenantSnapshot>,
) -> Result<Json<ApiResponse<RequirementTrace>>, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::Validation("requirement code is required".to_string()));
    }

    let trace = traceability::trace_requirement(&snapshot, code);
    tracing::debug!(
        requirement = %code,
        risks = trace.risks.len(),
        controls = trace.controls.len(),
        "Traced requirement"
    );
    Ok(ApiResponse::success(trace))
}

/// POST /api/v1/traceability/risks/{id}: requirements, controls and evidence for a risk.
pub async fn risk(
    Path(id): Path<Uuid>,
    Json(snapshot): Json<TenantSnapshot>,
) -> Result<Json<ApiResponse<RiskTrace>>, AppError> {
    let trace = traceability::trace_risk_by_id(&snapshot, id)
        .ok_or_else(|| AppError::NotFound(format!("Risk {id} not in snapshot")))?;
    Ok(ApiResponse::success(trace))
}
