//! Dashboard roll-up of one tenant snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ScoringConfig;
use crate::errors::AppError;
use crate::models::kri::KriStatus;
use crate::models::risk::SeverityLevel;
use crate::models::snapshot::TenantSnapshot;
use crate::services::compliance::{self, RequirementScore};
use crate::services::digest;
use crate::services::kri::{self, KriResult, KriStatusCounts};
use crate::services::risk_matrix::{self, HeatMap};

/// Aggregated figures for the overview page.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub snapshot_digest: String,
    pub generated_at: DateTime<Utc>,
    pub risk_count: u32,
    pub severity_distribution: Vec<LevelCount>,
    pub heat_map: HeatMap,
    pub compliance: RequirementScore,
    pub kri_counts: KriStatusCounts,
    pub red_kris: Vec<KriResult>,
}

/// Risks at one severity level before and after controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: SeverityLevel,
    pub inherent: u32,
    pub residual: u32,
}

/// Compute every dashboard figure from a snapshot.
pub fn summarize(
    snapshot: &TenantSnapshot,
    config: &ScoringConfig,
) -> Result<DashboardSummary, AppError> {
    let assessments = risk_matrix::assess_all(&snapshot.risks)?;
    let heat_map = risk_matrix::heat_map(&assessments);

    let severity_distribution = [
        SeverityLevel::Critical,
        SeverityLevel::High,
        SeverityLevel::Medium,
        SeverityLevel::Low,
        SeverityLevel::Negligible,
    ]
    .into_iter()
    .map(|level| LevelCount {
        level,
        inherent: assessments.iter().filter(|a| a.inherent_level == level).count() as u32,
        residual: assessments.iter().filter(|a| a.residual_level == level).count() as u32,
    })
    .collect();

    let compliance =
        compliance::score_requirements(&snapshot.requirements, |m| config.weight_for(m))?;

    let (kri_results, kri_counts) = kri::evaluate_all(&snapshot.kris);
    let red_kris = kri_results
        .into_iter()
        .filter(|r| r.status == KriStatus::Red)
        .collect();

    Ok(DashboardSummary {
        snapshot_digest: digest::snapshot_digest(snapshot)?,
        generated_at: Utc::now(),
        risk_count: heat_map.total,
        severity_distribution,
        heat_map,
        compliance,
        kri_counts,
        red_kris,
    })
}
