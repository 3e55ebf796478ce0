//! Residual risk derivation from inherent severity and control effectiveness.
//!
//! A risk's controls are reduced to one average effectiveness (arithmetic
//! mean, half rounded up) which then indexes the fixed 5x5 residual matrix
//! together with the inherent severity. A risk without controls gets no
//! mitigation credit.
//!
//! Pure functions over in-memory data: residual severity is never stored,
//! callers recompute whenever a severity or effectiveness changes.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::ScoringError;
use crate::models::risk::{Control, Risk, SeverityLevel, SCALE_MAX, SCALE_MIN};

/// Residual severity by `[inherent - 1][average effectiveness - 1]`.
///
/// Regulator-reviewed values. Not a formula: do not replace with arithmetic.
const RESIDUAL_MATRIX: [[u8; 5]; 5] = [
    // eff: 1  2  3  4  5
    [1, 1, 1, 1, 1], // inherent 1
    [2, 2, 1, 1, 1], // inherent 2
    [3, 3, 2, 2, 1], // inherent 3
    [4, 4, 3, 2, 1], // inherent 4
    [5, 5, 4, 3, 2], // inherent 5
];

/// Derived severity figures for one risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_id: Uuid,
    pub inherent_severity: u8,
    pub inherent_level: SeverityLevel,
    /// `None` when the risk has no controls.
    pub average_effectiveness: Option<u8>,
    pub residual_severity: u8,
    pub residual_level: SeverityLevel,
}

/// Count of risks per (inherent, residual) cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatMap {
    /// `counts[inherent - 1][residual - 1]`.
    pub counts: [[u32; 5]; 5],
    pub total: u32,
}

impl HeatMap {
    /// Number of risks in a cell; zero for coordinates off the scale.
    pub fn count(&self, inherent: u8, residual: u8) -> u32 {
        if !on_scale(inherent) || !on_scale(residual) {
            return 0;
        }
        self.counts[usize::from(inherent - 1)][usize::from(residual - 1)]
    }
}

fn on_scale(value: u8) -> bool {
    (SCALE_MIN..=SCALE_MAX).contains(&value)
}

/// Reject inherent severities outside 1-5.
pub fn check_severity(severity: i64) -> Result<u8, ScoringError> {
    match u8::try_from(severity) {
        Ok(value) if on_scale(value) => Ok(value),
        _ => Err(ScoringError::SeverityOutOfRange(severity)),
    }
}

/// Reject control effectiveness ratings outside 1-5.
pub fn check_effectiveness(effectiveness: i64) -> Result<u8, ScoringError> {
    match u8::try_from(effectiveness) {
        Ok(value) if on_scale(value) => Ok(value),
        _ => Err(ScoringError::EffectivenessOutOfRange(effectiveness)),
    }
}

/// Reduce a risk's controls to one effectiveness bucket.
///
/// Returns `None` for an empty slice. The mean is rounded half away from
/// zero (2.5 becomes 3) using integer arithmetic, then clamped to the scale.
pub fn average_effectiveness(controls: &[Control]) -> Result<Option<u8>, ScoringError> {
    if controls.is_empty() {
        return Ok(None);
    }

    let mut sum: u32 = 0;
    for control in controls {
        sum += u32::from(check_effectiveness(control.effectiveness)?);
    }
    let count = controls.len() as u32;

    // round(sum / count) for positive values: floor((2 * sum + count) / (2 * count))
    let rounded = (2 * sum + count) / (2 * count);
    let clamped = rounded.clamp(u32::from(SCALE_MIN), u32::from(SCALE_MAX)) as u8;
    Ok(Some(clamped))
}

/// Look up one matrix cell.
pub fn lookup(inherent: i64, effectiveness: i64) -> Result<u8, ScoringError> {
    Ok(cell(check_severity(inherent)?, check_effectiveness(effectiveness)?))
}

/// Matrix cell for values already known to be on the scale.
fn cell(inherent: u8, effectiveness: u8) -> u8 {
    RESIDUAL_MATRIX[usize::from(inherent - 1)][usize::from(effectiveness - 1)]
}

/// Residual severity for an inherent severity and the controls mitigating it.
pub fn residual_severity(inherent: i64, controls: &[Control]) -> Result<u8, ScoringError> {
    let inherent = check_severity(inherent)?;
    Ok(match average_effectiveness(controls)? {
        None => inherent,
        Some(effectiveness) => cell(inherent, effectiveness),
    })
}

/// Full derived view of one risk.
pub fn assess(risk: &Risk) -> Result<RiskAssessment, ScoringError> {
    let inherent = check_severity(risk.inherent_severity)?;
    let average = average_effectiveness(&risk.controls)?;
    let residual = match average {
        None => inherent,
        Some(effectiveness) => cell(inherent, effectiveness),
    };

    Ok(RiskAssessment {
        risk_id: risk.id,
        inherent_severity: inherent,
        inherent_level: level(inherent)?,
        average_effectiveness: average,
        residual_severity: residual,
        residual_level: level(residual)?,
    })
}

/// Assess every risk, failing on the first invariant violation.
///
/// Output order follows input order.
pub fn assess_all(risks: &[Risk]) -> Result<Vec<RiskAssessment>, ScoringError> {
    risks.iter().map(assess).collect()
}

/// Tally assessed risks into the inherent/residual heat map.
pub fn heat_map(assessments: &[RiskAssessment]) -> HeatMap {
    let mut map = HeatMap::default();
    for a in assessments {
        if on_scale(a.inherent_severity) && on_scale(a.residual_severity) {
            let row = usize::from(a.inherent_severity - 1);
            let col = usize::from(a.residual_severity - 1);
            map.counts[row][col] += 1;
            map.total += 1;
        }
    }
    map
}

fn level(score: u8) -> Result<SeverityLevel, ScoringError> {
    SeverityLevel::from_score(score).ok_or(ScoringError::SeverityOutOfRange(i64::from(score)))
}
