//! Rating-indexed parameter tables
//!
//! Tables are explicit immutable maps keyed by the enumerated rating types.
//! `validate` checks completeness over every key at startup; lookups still
//! return `Result` so a table built by hand fails loudly instead of
//! defaulting.

use crate::config::ConfigError;
use crate::models::employee::{PerformanceRating, RatingTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters attached to one performance rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingParams {
    /// Sampling weight in the population (need not be normalized)
    pub weight: f64,
    /// Share of spillover workload this rating absorbs relative to peers
    pub absorption: f64,
    /// Market salary multiplier for this rating
    pub performance_multiplier: f64,
    /// Whether this rating counts as a high performer
    pub high_performer: bool,
}

/// Rating → parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    entries: BTreeMap<PerformanceRating, RatingParams>,
}

impl RatingTable {
    pub fn new(entries: BTreeMap<PerformanceRating, RatingParams>) -> Self {
        Self { entries }
    }

    /// Look up the parameters of a rating
    pub fn params(&self, rating: PerformanceRating) -> Result<&RatingParams, ConfigError> {
        self.entries.get(&rating).ok_or(ConfigError::Missing {
            table: "rating_table",
            key: rating.label().to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut total_weight = 0.0;
        for rating in PerformanceRating::ALL {
            let params = self.params(rating)?;
            if !(params.weight >= 0.0) {
                return Err(ConfigError::InvalidWeights {
                    field: "rating_table.weight",
                });
            }
            if !(params.absorption >= 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "rating_table.absorption",
                });
            }
            if !(params.performance_multiplier > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "rating_table.performance_multiplier",
                });
            }
            total_weight += params.weight;
        }
        if !(total_weight > 0.0) {
            return Err(ConfigError::InvalidWeights {
                field: "rating_table.weight",
            });
        }
        Ok(())
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        use PerformanceRating::*;

        // (rating, weight, absorption, performance multiplier, high performer)
        let rows = [
            (S, 0.03, 1.6, 1.40, true),
            (APlus, 0.05, 1.4, 1.25, true),
            (A, 0.08, 1.3, 1.20, true),
            (AMinus, 0.10, 1.2, 1.15, true),
            (BPlus, 0.15, 1.1, 1.08, false),
            (B, 0.25, 1.0, 1.00, false),
            (BMinus, 0.15, 0.9, 0.95, false),
            (C, 0.12, 0.7, 0.85, false),
            (D, 0.07, 0.5, 0.70, false),
        ];

        let entries = rows
            .into_iter()
            .map(|(rating, weight, absorption, performance_multiplier, high_performer)| {
                (
                    rating,
                    RatingParams {
                        weight,
                        absorption,
                        performance_multiplier,
                        high_performer,
                    },
                )
            })
            .collect();

        Self { entries }
    }
}

/// Salary premium paid to a replacement, keyed by the departed employee's tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementPremiums {
    entries: BTreeMap<RatingTier, f64>,
}

impl ReplacementPremiums {
    pub fn new(entries: BTreeMap<RatingTier, f64>) -> Self {
        Self { entries }
    }

    /// Multiplier applied to the prior salary to price the replacement
    pub fn premium(&self, tier: RatingTier) -> Result<f64, ConfigError> {
        self.entries.get(&tier).copied().ok_or(ConfigError::Missing {
            table: "replacement_premiums",
            key: format!("{:?}", tier),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in RatingTier::ALL {
            if !(self.premium(tier)? > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "replacement_premiums",
                });
            }
        }
        Ok(())
    }

    /// Copy with every premium's markup (premium − 1) scaled by `factor`
    pub fn with_markup_scaled(&self, factor: f64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(tier, premium)| (*tier, 1.0 + (premium - 1.0) * factor))
                .collect(),
        }
    }
}

impl Default for ReplacementPremiums {
    fn default() -> Self {
        Self {
            entries: BTreeMap::from([
                (RatingTier::S, 1.30),
                (RatingTier::A, 1.25),
                (RatingTier::B, 1.15),
                (RatingTier::C, 1.10),
                (RatingTier::D, 1.05),
            ]),
        }
    }
}
