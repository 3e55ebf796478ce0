//! Regulatory requirement model and the compliance modules they are scored under.

use serde::{Deserialize, Serialize};

/// Compliance scoring unit. Owns a weight and a set of requirements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceModule {
    Governance,
    RiskManagement,
    Outsourcing,
    BusinessContinuity,
    CyberGovernance,
    CyberProtection,
    CyberIncident,
    CreditRisk,
}

impl ComplianceModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::RiskManagement => "risk_management",
            Self::Outsourcing => "outsourcing",
            Self::BusinessContinuity => "business_continuity",
            Self::CyberGovernance => "cyber_governance",
            Self::CyberProtection => "cyber_protection",
            Self::CyberIncident => "cyber_incident",
            Self::CreditRisk => "credit_risk",
        }
    }
}

impl std::fmt::Display for ComplianceModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assessed state of a single requirement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    Met,
    Partial,
    NotMet,
}

/// Regulation a requirement belongs to, e.g. `DORA` / "Digital Operational Resilience Act".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Regulation {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    /// Requirement identifier cited by risks and controls, e.g. `OUT-01`.
    pub code: String,
    pub regulation: Regulation,
    pub section: String,
    pub text: String,
    pub module: ComplianceModule,
    pub status: RequirementStatus,
    /// Tenant-level flag; not-applicable requirements never enter a score.
    #[serde(default = "default_applicable")]
    pub applicable: bool,
    /// Free-text evidence citations (document identifiers and the like).
    #[serde(default)]
    pub evidence: Vec<String>,
}

fn default_applicable() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_display_matches_serde_name() {
        for module in [
            ComplianceModule::Governance,
            ComplianceModule::CyberProtection,
            ComplianceModule::CreditRisk,
        ] {
            let json = serde_json::to_value(module).unwrap();
            assert_eq!(json, module.to_string());
        }
    }

    #[test]
    fn requirement_defaults_to_applicable() {
        let json = serde_json::json!({
            "code": "GOV-03",
            "regulation": { "code": "DORA", "name": "Digital Operational Resilience Act" },
            "section": "Art. 5",
            "text": "Management body defines the ICT risk framework",
            "module": "governance",
            "status": "partial"
        });
        let req: Requirement = serde_json::from_value(json).unwrap();
        assert!(req.applicable);
        assert!(req.evidence.is_empty());
        assert_eq!(req.status, RequirementStatus::Partial);
    }

    #[test]
    fn status_uses_snake_case() {
        let status: RequirementStatus = serde_json::from_str("\"not_met\"").unwrap();
        assert_eq!(status, RequirementStatus::NotMet);
    }
}
