//! Service configuration: process settings from the environment and the
//! tenant scoring configuration (module weights, KRI thresholds) from JSON.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::kri::KriThresholds;
use crate::models::requirement::ComplianceModule;
use crate::services::compliance::{self, DEFAULT_WEIGHT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for environment variable {name}")]
    Env { name: &'static str, value: String },

    #[error("Failed to read scoring config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scoring config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scoring config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Default threshold set for a KRI code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KriThresholdSet {
    pub green: f64,
    pub yellow: f64,
    pub red: f64,
    #[serde(default)]
    pub reverse: bool,
}

impl KriThresholdSet {
    pub fn thresholds(&self) -> KriThresholds {
        KriThresholds {
            green: self.green,
            yellow: self.yellow,
            red: self.red,
        }
    }
}

/// Tenant scoring configuration.
///
/// Modules without a configured weight count with weight 1. Negative or
/// non-finite weights fail validation, as do non-finite KRI thresholds.
/// Threshold ordering is deliberately not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "validate_scoring_config"))]
pub struct ScoringConfig {
    #[serde(default)]
    pub module_weights: BTreeMap<ComplianceModule, f64>,
    #[serde(default)]
    pub kri_thresholds: BTreeMap<String, KriThresholdSet>,
}

impl ScoringConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;

        for (module, weight) in &config.module_weights {
            if *weight == 0.0 {
                tracing::warn!(module = %module, "Module weight is zero; excluded from overall score");
            }
        }
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            module_weights = config.module_weights.len(),
            kri_definitions = config.kri_thresholds.len(),
            "Loaded scoring configuration"
        );
        Ok(config)
    }

    /// Configured weight for a module, or the default of 1.
    pub fn weight_for(&self, module: ComplianceModule) -> f64 {
        self.module_weights
            .get(&module)
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Default thresholds for a KRI code, if configured.
    pub fn thresholds_for(&self, code: &str) -> Option<&KriThresholdSet> {
        self.kri_thresholds.get(code)
    }
}

fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ValidationError> {
    for (module, weight) in &config.module_weights {
        if let Err(e) = compliance::check_weight(*module, *weight) {
            let mut err = ValidationError::new("negative_weight");
            err.message = Some(Cow::from(e.to_string()));
            return Err(err);
        }
    }

    for (code, set) in &config.kri_thresholds {
        if ![set.green, set.yellow, set.red].iter().all(|v| v.is_finite()) {
            let mut err = ValidationError::new("non_finite_threshold");
            err.message = Some(Cow::from(format!("KRI {code} has a non-finite threshold")));
            return Err(err);
        }
    }
    Ok(())
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub scoring_config_path: Option<String>,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let scoring_config_path = env::var("SCORING_CONFIG_PATH").ok();
        let scoring = match &scoring_config_path {
            Some(path) => ScoringConfig::load(path)?,
            None => {
                tracing::info!("SCORING_CONFIG_PATH not set; using default module weights");
                ScoringConfig::default()
            }
        };

        Ok(Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_port(env::var("BACKEND_PORT").ok())?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://localhost:5173".to_string()),
            scoring_config_path,
            scoring,
        })
    }
}

/// Listening port from `BACKEND_PORT`; 3000 when unset.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(3000),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Env {
            name: "BACKEND_PORT",
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_weights_and_thresholds() {
        let config = ScoringConfig::from_json_str(
            r#"{
                "module_weights": { "governance": 2.0, "cyber_protection": 1.5 },
                "kri_thresholds": {
                    "CET1": { "green": 12.0, "yellow": 10.0, "red": 9.0, "reverse": true },
                    "NPL": { "green": 5.0, "yellow": 7.0, "red": 10.0 }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.weight_for(ComplianceModule::Governance), 2.0);
        assert_eq!(config.weight_for(ComplianceModule::CyberProtection), 1.5);
        assert_eq!(config.weight_for(ComplianceModule::Outsourcing), 1.0);
        assert!(config.thresholds_for("CET1").unwrap().reverse);
        assert!(!config.thresholds_for("NPL").unwrap().reverse);
        assert!(config.thresholds_for("LCR").is_none());
    }

    #[test]
    fn empty_document_is_default() {
        let config = ScoringConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn zero_weight_is_accepted() {
        let config =
            ScoringConfig::from_json_str(r#"{ "module_weights": { "credit_risk": 0 } }"#).unwrap();
        assert_eq!(config.weight_for(ComplianceModule::CreditRisk), 0.0);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = ScoringConfig::from_json_str(r#"{ "module_weights": { "governance": -1 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("governance"));
    }

    #[test]
    fn unknown_module_is_a_parse_error() {
        let err = ScoringConfig::from_json_str(r#"{ "module_weights": { "marketing": 1 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "module_weights": {{ "outsourcing": 3 }} }}"#).unwrap();

        let config = ScoringConfig::load(file.path()).unwrap();
        assert_eq!(config.weight_for(ComplianceModule::Outsourcing), 3.0);
    }

    #[test]
    fn port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), 3000);
        assert_eq!(parse_port(Some("8080".to_string())).unwrap(), 8080);
    }

    #[test]
    fn malformed_port_is_rejected() {
        for raw in ["http", "70000", "-1", ""] {
            let err = parse_port(Some(raw.to_string())).unwrap_err();
            assert!(matches!(err, ConfigError::Env { name: "BACKEND_PORT", .. }));
        }
        let err = parse_port(Some("eighty".to_string())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"eighty\" for environment variable BACKEND_PORT"
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ScoringConfig::load("/nonexistent/scoring.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
