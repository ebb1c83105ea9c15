//! Simulation configuration
//!
//! [`SimulationConfig`] gathers every tunable of a run. `Default` reproduces
//! the reference calibration (1,000 employees, 24 months, 50 trials); a JSON
//! document may override any subset of fields.
//!
//! # Example
//!
//! ```
//! use workforce_simulator_core_rs::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{
//!     "num_employees": 200,
//!     "num_months": 12,
//!     "rng_seed": 7,
//!     "hiring": { "lead_times": { "urban": 4, "rural": 8 } }
//! }"#).unwrap();
//!
//! assert_eq!(config.num_employees, 200);
//! assert_eq!(config.hiring.lead_times.rural, 8);
//! assert_eq!(config.num_trials, 50); // untouched fields keep their defaults
//! ```

pub mod tables;

pub use tables::{RatingParams, RatingTable, ReplacementPremiums};

use crate::attrition::AttritionConfig;
use crate::costs::FinancialRates;
use crate::events::{ScenarioError, ScheduledEvent};
use crate::models::employee::Branch;
use crate::overtime::OvertimeConfig;
use crate::population::PopulationConfig;
use crate::vacancy::HiringConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing entry '{key}' in {table}")]
    Missing { table: &'static str, key: String },

    #[error("Invalid weights for {field}: must be non-negative with a positive sum")]
    InvalidWeights { field: &'static str },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("Invalid range for {field}: [{min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Lead time for {branch} must be at least one month")]
    InvalidLeadTime { branch: Branch },

    #[error("Invalid scenario event: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Config parse error: {0}")]
    Parse(String),
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Size of the synthesized workforce
    pub num_employees: usize,
    /// Monthly ticks per trial
    pub num_months: usize,
    /// Independent Monte Carlo trials
    pub num_trials: usize,
    /// Master seed; `None` draws one from OS entropy
    pub rng_seed: Option<u64>,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
    /// Keep per-trial event logs
    pub record_events: bool,

    pub population: PopulationConfig,
    pub rating_table: RatingTable,
    pub attrition: AttritionConfig,
    pub overtime: OvertimeConfig,
    pub hiring: HiringConfig,
    pub financial: FinancialRates,
    pub scenario_events: Vec<ScheduledEvent>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_employees: 1000,
            num_months: 24,
            num_trials: 50,
            rng_seed: Some(42),
            parallel: false,
            record_events: false,
            population: PopulationConfig::default(),
            rating_table: RatingTable::default(),
            attrition: AttritionConfig::default(),
            overtime: OvertimeConfig::default(),
            hiring: HiringConfig::default(),
            financial: FinancialRates::default(),
            scenario_events: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON document; absent fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every sub-configuration and table for completeness and range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_employees == 0 {
            return Err(ConfigError::NonPositive {
                field: "num_employees",
            });
        }
        if self.num_months == 0 {
            return Err(ConfigError::NonPositive {
                field: "num_months",
            });
        }
        if self.num_trials == 0 {
            return Err(ConfigError::NonPositive {
                field: "num_trials",
            });
        }
        self.population.validate()?;
        self.rating_table.validate()?;
        self.attrition.validate()?;
        self.overtime.validate()?;
        self.hiring.validate()?;
        self.financial.validate()?;
        for scheduled in &self.scenario_events {
            scheduled.validate()?;
        }
        Ok(())
    }
}

/// Compute deterministic SHA256 hash of a config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on map iteration order. Aggregate results carry this hash so a
/// figure can always be traced back to the parameters that produced it.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, ConfigError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| ConfigError::Parse(format!("Config serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| ConfigError::Parse(format!("Config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
