//! Compliance routes: weighted module aggregation.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::models::requirement::Requirement;
use crate::services::compliance::{self, ComplianceScore, ModuleTally, RequirementScore};
use crate::AppState;

/// Pre-counted module tallies.
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    pub modules: Vec<ModuleTally>,
}

/// Raw requirement list to be counted per module.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub requirements: Vec<Requirement>,
}

/// POST /api/v1/compliance/aggregate: aggregate caller-supplied tallies.
///
/// A tally without a weight takes the configured module weight.
pub async fn aggregate(
    State(state): State<AppState>,
    Json(body): Json<AggregateRequest>,
) -> Result<Json<ApiResponse<ComplianceScore>>, AppError> {
    let scoring = &state.config.scoring;
    let tallies: Vec<ModuleTally> = body
        .modules
        .into_iter()
        .map(|t| ModuleTally {
            weight: t.weight.or(Some(scoring.weight_for(t.module))),
            ..t
        })
        .collect();

    let score = compliance::aggregate(&tallies)?;
    tracing::debug!(
        modules = score.modules.len(),
        overall = score.overall_percentage,
        "Aggregated compliance tallies"
    );
    Ok(ApiResponse::success(score))
}

/// POST /api/v1/compliance/score: count requirements per module and aggregate.
pub async fn score(
    State(state): State<AppState>,
    Json(body): Json<ScoreRequest>,
) -> Result<Json<ApiResponse<RequirementScore>>, AppError> {
    let scoring = &state.config.scoring;
    let result = compliance::score_requirements(&body.requirements, |m| scoring.weight_for(m))?;
    tracing::debug!(
        requirements = body.requirements.len(),
        overall = result.score.overall_percentage,
        "Scored requirements"
    );
    Ok(ApiResponse::success(result))
}
