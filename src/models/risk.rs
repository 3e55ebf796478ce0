//! Risk register model: risks, their mitigating controls, and the 1-5 scale.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::requirement::ComplianceModule;

/// Lowest point on the severity and effectiveness scales.
pub const SCALE_MIN: u8 = 1;
/// Highest point on the severity and effectiveness scales.
pub const SCALE_MAX: u8 = 5;

/// Risk taxonomy label shown in the register.
///
/// Kept separate from [`ComplianceModule`]: a category describes what kind of
/// risk this is, a module is the unit compliance is scored and weighted by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Governance,
    Operational,
    Outsourcing,
    BusinessContinuity,
    CyberGovernance,
    CyberProtection,
    CyberIncident,
    Credit,
    Compliance,
}

/// Named level for a point on the 1-5 severity scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityLevel {
    Negligible,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Level for a scale value, or `None` outside 1-5.
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Self::Negligible),
            2 => Some(Self::Low),
            3 => Some(Self::Medium),
            4 => Some(Self::High),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            Self::Negligible => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::Critical => 5,
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negligible => write!(f, "1 - Negligible"),
            Self::Low => write!(f, "2 - Low"),
            Self::Medium => write!(f, "3 - Medium"),
            Self::High => write!(f, "4 - High"),
            Self::Critical => write!(f, "5 - Critical"),
        }
    }
}

/// Pointer from a risk or control to the regulation it implements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegulatoryRef {
    pub regulation: Option<String>,
    pub section: Option<String>,
    pub requirement_code: Option<String>,
}

/// Mitigating measure attached to a risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Control {
    pub id: Uuid,
    pub description: String,
    /// 1 = not implemented ... 5 = highly effective.
    ///
    /// Signed and wide so that any integer reaches range checking instead of
    /// failing to decode.
    pub effectiveness: i64,
    #[serde(default)]
    pub regulatory_ref: Option<RegulatoryRef>,
}

impl Control {
    /// Requirement code this control cites, if any.
    pub fn requirement_code(&self) -> Option<&str> {
        self.regulatory_ref
            .as_ref()
            .and_then(|r| r.requirement_code.as_deref())
    }
}

/// Registered risk with its controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Risk {
    pub id: Uuid,
    pub title: String,
    pub category: RiskCategory,
    pub module: ComplianceModule,
    /// 1 = negligible ... 5 = critical, before any control is considered.
    pub inherent_severity: i64,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub regulatory_ref: Option<RegulatoryRef>,
}

impl Risk {
    /// Requirement code the risk itself cites, if any.
    pub fn requirement_code(&self) -> Option<&str> {
        self.regulatory_ref
            .as_ref()
            .and_then(|r| r.requirement_code.as_deref())
    }
}
