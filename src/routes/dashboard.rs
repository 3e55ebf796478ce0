//! Dashboard routes: aggregated figures for the overview page.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::snapshot::TenantSnapshot;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

/// POST /api/v1/dashboard/summary: every dashboard figure for one snapshot.
pub async fn summary(
    State(state): State<AppState>,
    Json(snapshot): Json<TenantSnapshot>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let summary = dashboard::summarize(&snapshot, &state.config.scoring)?;
    tracing::info!(
        digest = %summary.snapshot_digest,
        risks = summary.risk_count,
        overall = summary.compliance.score.overall_percentage,
        "Dashboard summary computed"
    );
    Ok(ApiResponse::success(summary))
}
