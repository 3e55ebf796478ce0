//! Traffic-light classification of key risk indicator readings.
//!
//! Normal indicators (lower is better) compare with `<=`, reverse indicators
//! (higher is better) with `>=`. Branches are tried green, then yellow, and
//! the first match wins; anything else is red. Thresholds are not checked for
//! ordering, so a misordered set still yields a deterministic status. The red
//! boundary is informational and never consulted.

use serde::Serialize;
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::errors::AppError;
use crate::models::kri::{Kri, KriReading, KriStatus, KriThresholds};

/// Classified indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KriResult {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub reading: f64,
    pub reverse: bool,
    pub status: KriStatus,
}

/// Number of indicators in each status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KriStatusCounts {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

impl KriStatusCounts {
    pub fn record(&mut self, status: KriStatus) {
        match status {
            KriStatus::Green => self.green += 1,
            KriStatus::Yellow => self.yellow += 1,
            KriStatus::Red => self.red += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.green + self.yellow + self.red
    }
}

/// Classify a single reading.
///
/// A NaN reading matches no comparison and is therefore red.
pub fn classify(reading: f64, thresholds: &KriThresholds, reverse: bool) -> KriStatus {
    if reverse {
        if reading >= thresholds.green {
            KriStatus::Green
        } else if reading >= thresholds.yellow {
            KriStatus::Yellow
        } else {
            KriStatus::Red
        }
    } else if reading <= thresholds.green {
        KriStatus::Green
    } else if reading <= thresholds.yellow {
        KriStatus::Yellow
    } else {
        KriStatus::Red
    }
}

/// Classify one indicator.
pub fn evaluate(kri: &Kri) -> KriResult {
    KriResult {
        id: kri.id,
        code: kri.code.clone(),
        name: kri.name.clone(),
        reading: kri.reading,
        reverse: kri.reverse,
        status: classify(kri.reading, &kri.thresholds, kri.reverse),
    }
}

/// Classify every indicator, preserving input order, and count the statuses.
pub fn evaluate_all(kris: &[Kri]) -> (Vec<KriResult>, KriStatusCounts) {
    let mut counts = KriStatusCounts::default();
    let results = kris
        .iter()
        .map(|kri| {
            let result = evaluate(kri);
            counts.record(result.status);
            result
        })
        .collect();
    (results, counts)
}

/// Turn a submitted reading into a full indicator.
///
/// Inline thresholds win over configured defaults. An explicit `reverse`
/// wins over the configured direction. Readings without an id get a fresh
/// time-ordered one.
pub fn resolve_reading(reading: &KriReading, config: &ScoringConfig) -> Result<Kri, AppError> {
    let configured = config.thresholds_for(&reading.code);
    let thresholds = match (reading.thresholds, configured) {
        (Some(inline), _) => inline,
        (None, Some(set)) => set.thresholds(),
        (None, None) => {
            return Err(AppError::NotFound(format!(
                "No thresholds configured for KRI {}",
                reading.code
            )))
        }
    };
    let reverse = reading
        .reverse
        .or(configured.map(|set| set.reverse))
        .unwrap_or(false);

    Ok(Kri {
        id: reading.id.unwrap_or_else(Uuid::now_v7),
        code: reading.code.clone(),
        name: reading.name.clone(),
        reading: reading.reading,
        thresholds,
        reverse,
        unit: reading.unit.clone(),
        measured_at: reading.measured_at,
    })
}
