//! Weighted compliance aggregation across modules.
//!
//! Per-module percentage is `met / total`. The overall figure pools the
//! weighted requirement counts, `sum(w * met) / sum(w * total)`, so a small
//! module cannot swing the result as far as a large one. A module with no
//! applicable requirements scores 0% and adds nothing to either sum.
//!
//! Only `Met` requirements earn credit. `Partial` is counted and reported
//! but is worth nothing in the percentage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;
use crate::models::requirement::{ComplianceModule, Requirement, RequirementStatus};

/// Weight applied to a module with no configured weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Aggregator input for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTally {
    pub module: ComplianceModule,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Applicable requirements only.
    pub total: u32,
    pub met: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleScore {
    pub module: ComplianceModule,
    pub weight: f64,
    pub total: u32,
    pub met: u32,
    /// 0-100.
    pub percentage: f64,
    /// False when the module had nothing to score, so a 0% here is not a failing grade.
    pub has_requirements: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceScore {
    pub modules: Vec<ModuleScore>,
    pub weighted_met: f64,
    pub weighted_total: f64,
    /// 0-100. Zero when no module carries weighted requirements.
    pub overall_percentage: f64,
}

/// Requirement status counts for one module, ahead of aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementCounts {
    pub module: ComplianceModule,
    pub met: u32,
    pub partial: u32,
    pub not_met: u32,
    pub not_applicable: u32,
}

impl RequirementCounts {
    /// Requirements that enter the denominator.
    pub fn applicable(&self) -> u32 {
        self.met + self.partial + self.not_met
    }

    /// Requirements that enter the numerator.
    pub fn credited(&self) -> u32 {
        self.met
    }
}

/// Scored requirement list: the aggregate plus the raw counts behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementScore {
    pub score: ComplianceScore,
    pub counts: Vec<RequirementCounts>,
}

/// Reject negative and non-finite weights.
pub fn check_weight(module: ComplianceModule, weight: f64) -> Result<f64, ScoringError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(ScoringError::NegativeWeight { module, weight })
    }
}

/// Aggregate per-module tallies into module and overall percentages.
///
/// Module order in the output follows the input.
pub fn aggregate(tallies: &[ModuleTally]) -> Result<ComplianceScore, ScoringError> {
    let mut modules = Vec::with_capacity(tallies.len());
    let mut weighted_met = 0.0;
    let mut weighted_total = 0.0;

    for tally in tallies {
        let weight = check_weight(tally.module, tally.weight.unwrap_or(DEFAULT_WEIGHT))?;
        if tally.met > tally.total {
            return Err(ScoringError::MetExceedsTotal {
                module: tally.module,
                met: tally.met,
                total: tally.total,
            });
        }

        weighted_met += weight * f64::from(tally.met);
        weighted_total += weight * f64::from(tally.total);

        modules.push(ModuleScore {
            module: tally.module,
            weight,
            total: tally.total,
            met: tally.met,
            percentage: percentage(f64::from(tally.met), f64::from(tally.total)),
            has_requirements: tally.total > 0,
        });
    }

    Ok(ComplianceScore {
        modules,
        weighted_met,
        weighted_total,
        overall_percentage: percentage(weighted_met, weighted_total),
    })
}

/// Count requirement statuses per module, in module order.
///
/// Not-applicable requirements are counted separately and excluded from
/// `applicable()` whatever their status.
pub fn count_requirements(requirements: &[Requirement]) -> Vec<RequirementCounts> {
    let mut by_module: BTreeMap<ComplianceModule, RequirementCounts> = BTreeMap::new();

    for req in requirements {
        let counts = by_module
            .entry(req.module)
            .or_insert_with(|| RequirementCounts {
                module: req.module,
                met: 0,
                partial: 0,
                not_met: 0,
                not_applicable: 0,
            });

        if !req.applicable {
            counts.not_applicable += 1;
            continue;
        }
        match req.status {
            RequirementStatus::Met => counts.met += 1,
            RequirementStatus::Partial => counts.partial += 1,
            RequirementStatus::NotMet => counts.not_met += 1,
        }
    }

    by_module.into_values().collect()
}

/// Count, weight and aggregate a requirement list.
///
/// `weight_for` supplies each module's configured weight.
pub fn score_requirements<F>(
    requirements: &[Requirement],
    weight_for: F,
) -> Result<RequirementScore, ScoringError>
where
    F: Fn(ComplianceModule) -> f64,
{
    let counts = count_requirements(requirements);
    let tallies: Vec<ModuleTally> = counts
        .iter()
        .map(|c| ModuleTally {
            module: c.module,
            weight: Some(weight_for(c.module)),
            total: c.applicable(),
            met: c.credited(),
        })
        .collect();

    Ok(RequirementScore {
        score: aggregate(&tallies)?,
        counts,
    })
}

fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        100.0 * numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requirement::Regulation;

    fn tally(module: ComplianceModule, weight: Option<f64>, total: u32, met: u32) -> ModuleTally {
        ModuleTally {
            module,
            weight,
            total,
            met,
        }
    }

    fn requirement(code: &str, module: ComplianceModule, status: RequirementStatus) -> Requirement {
        Requirement {
            code: code.to_string(),
            regulation: Regulation {
                code: "DORA".to_string(),
                name: "Digital Operational Resilience Act".to_string(),
            },
            section: "Art. 6".to_string(),
            text: "ICT risk management framework".to_string(),
            module,
            status,
            applicable: true,
            evidence: Vec::new(),
        }
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn weighted_pooling_example() {
        let result = aggregate(&[
            tally(ComplianceModule::Governance, Some(2.0), 10, 8),
            tally(ComplianceModule::CyberProtection, Some(1.0), 5, 5),
        ])
        .unwrap();

        approx(result.modules[0].percentage, 80.0);
        approx(result.modules[1].percentage, 100.0);
        // (2*8 + 1*5) / (2*10 + 1*5) = 21/25
        approx(result.weighted_met, 21.0);
        approx(result.weighted_total, 25.0);
        approx(result.overall_percentage, 84.0);
    }

    #[test]
    fn empty_module_scores_zero_without_moving_overall() {
        let base = aggregate(&[
            tally(ComplianceModule::Governance, Some(2.0), 10, 8),
            tally(ComplianceModule::CyberProtection, Some(1.0), 5, 5),
        ])
        .unwrap();
        let with_bcp = aggregate(&[
            tally(ComplianceModule::Governance, Some(2.0), 10, 8),
            tally(ComplianceModule::CyberProtection, Some(1.0), 5, 5),
            tally(ComplianceModule::BusinessContinuity, Some(1.0), 0, 0),
        ])
        .unwrap();

        let bcp = &with_bcp.modules[2];
        approx(bcp.percentage, 0.0);
        assert!(!bcp.has_requirements);
        approx(with_bcp.weighted_total, base.weighted_total);
        approx(with_bcp.overall_percentage, base.overall_percentage);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let result = aggregate(&[
            tally(ComplianceModule::Governance, None, 4, 2),
            tally(ComplianceModule::Outsourcing, None, 6, 6),
        ])
        .unwrap();
        approx(result.modules[0].weight, 1.0);
        approx(result.overall_percentage, 80.0);
    }

    #[test]
    fn zero_weight_excludes_module_from_overall() {
        let result = aggregate(&[
            tally(ComplianceModule::Governance, Some(1.0), 10, 10),
            tally(ComplianceModule::CreditRisk, Some(0.0), 10, 0),
        ])
        .unwrap();
        approx(result.modules[1].percentage, 0.0);
        assert!(result.modules[1].has_requirements);
        approx(result.overall_percentage, 100.0);
    }

    #[test]
    fn nothing_to_score_is_zero() {
        let result = aggregate(&[]).unwrap();
        approx(result.overall_percentage, 0.0);
        assert!(result.modules.is_empty());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = aggregate(&[tally(ComplianceModule::Governance, Some(-0.5), 3, 1)]).unwrap_err();
        assert_eq!(
            err,
            ScoringError::NegativeWeight {
                module: ComplianceModule::Governance,
                weight: -0.5,
            }
        );
        assert!(check_weight(ComplianceModule::Governance, f64::NAN).is_err());
        assert!(check_weight(ComplianceModule::Governance, f64::INFINITY).is_err());
    }

    #[test]
    fn met_above_total_is_rejected() {
        let err = aggregate(&[tally(ComplianceModule::Outsourcing, None, 2, 3)]).unwrap_err();
        assert!(matches!(err, ScoringError::MetExceedsTotal { met: 3, total: 2, .. }));
    }

    #[test]
    fn partial_earns_no_credit() {
        let reqs = vec![
            requirement("GOV-01", ComplianceModule::Governance, RequirementStatus::Met),
            requirement("GOV-02", ComplianceModule::Governance, RequirementStatus::Partial),
            requirement("GOV-03", ComplianceModule::Governance, RequirementStatus::NotMet),
            requirement("GOV-04", ComplianceModule::Governance, RequirementStatus::Partial),
        ];
        let result = score_requirements(&reqs, |_| DEFAULT_WEIGHT).unwrap();
        let counts = &result.counts[0];
        assert_eq!(counts.met, 1);
        assert_eq!(counts.partial, 2);
        assert_eq!(counts.not_met, 1);
        approx(result.score.overall_percentage, 25.0);
    }

    #[test]
    fn not_applicable_leaves_both_sides() {
        let mut skipped = requirement("OUT-02", ComplianceModule::Outsourcing, RequirementStatus::NotMet);
        skipped.applicable = false;
        let reqs = vec![
            requirement("OUT-01", ComplianceModule::Outsourcing, RequirementStatus::Met),
            skipped,
        ];
        let result = score_requirements(&reqs, |_| DEFAULT_WEIGHT).unwrap();
        assert_eq!(result.counts[0].not_applicable, 1);
        assert_eq!(result.score.modules[0].total, 1);
        approx(result.score.modules[0].percentage, 100.0);
    }

    #[test]
    fn requirements_are_grouped_and_weighted() {
        let reqs = vec![
            requirement("CYB-01", ComplianceModule::CyberProtection, RequirementStatus::Met),
            requirement("GOV-01", ComplianceModule::Governance, RequirementStatus::NotMet),
            requirement("GOV-02", ComplianceModule::Governance, RequirementStatus::Met),
        ];
        let result = score_requirements(&reqs, |module| match module {
            ComplianceModule::Governance => 3.0,
            _ => DEFAULT_WEIGHT,
        })
        .unwrap();

        let modules: Vec<ComplianceModule> = result.score.modules.iter().map(|m| m.module).collect();
        assert_eq!(
            modules,
            vec![ComplianceModule::Governance, ComplianceModule::CyberProtection]
        );
        // (3*1 + 1*1) / (3*2 + 1*1) = 4/7
        approx(result.score.overall_percentage, 400.0 / 7.0);
    }

    #[test]
    fn repeated_aggregation_is_stable() {
        let input = [
            tally(ComplianceModule::Governance, Some(2.0), 10, 8),
            tally(ComplianceModule::CyberIncident, None, 3, 1),
        ];
        assert_eq!(aggregate(&input).unwrap(), aggregate(&input).unwrap());
    }
}
