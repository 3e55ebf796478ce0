//! Key risk indicator model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Boundaries for the three traffic-light tiers.
///
/// For a normal indicator they are read as upper bounds, for a reverse
/// indicator as lower bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KriThresholds {
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KriStatus {
    Green,
    Yellow,
    Red,
}

/// Monitored indicator with its latest reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kri {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub reading: f64,
    pub thresholds: KriThresholds,
    /// Higher readings are desirable (capital ratio) rather than undesirable (default rate).
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub measured_at: Option<DateTime<Utc>>,
}

/// Raw reading as submitted by a caller.
///
/// Thresholds and direction may be omitted when the scoring configuration
/// defines defaults for the code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct KriReading {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub reading: f64,
    #[serde(default)]
    pub thresholds: Option<KriThresholds>,
    #[serde(default)]
    pub reverse: Option<bool>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub measured_at: Option<DateTime<Utc>>,
}
