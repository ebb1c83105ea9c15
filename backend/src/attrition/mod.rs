//! Attrition model
//!
//! Additive monthly resignation risk:
//!
//! ```text
//! financial_risk = max(0, compa_target - compa_ratio)
//! workload_risk  = (min(overtime, overtime_cap) / workload_normalizer) × sensitivity
//! p              = base_rate + financial_risk × financial_weight
//!                            + workload_risk × workload_weight
//! ```
//!
//! `sensitivity` is `high_performer_sensitivity` for high performers and 1.0
//! otherwise. Each active employee resigns independently when a uniform draw
//! falls below `p`.
//!
//! # Probability bound
//!
//! The formula has no natural upper bound. [`ProbabilityPolicy::Clamp`]
//! (default) clamps `p` to `[0, 1]`; [`ProbabilityPolicy::Unbounded`] passes
//! the raw value through. Because draws lie in `[0, 1)`, both policies make
//! the same resignation decisions; they differ only in the probability that
//! is reported and logged.

use crate::config::ConfigError;
use crate::models::employee::Employee;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// How to treat computed probabilities outside `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityPolicy {
    #[default]
    Clamp,
    Unbounded,
}

/// Coefficients of the resignation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttritionConfig {
    /// Baseline monthly resignation probability
    pub base_rate: f64,
    /// Compa-ratio at or above which pay adds no risk
    pub compa_target: f64,
    pub financial_weight: f64,
    pub workload_weight: f64,
    /// Overtime above this many hours adds no further risk
    pub overtime_cap: f64,
    /// Overtime hours that count as one unit of workload risk
    pub workload_normalizer: f64,
    pub high_performer_sensitivity: f64,
    pub probability_policy: ProbabilityPolicy,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.008,
            compa_target: 1.2,
            financial_weight: 0.02,
            workload_weight: 0.02,
            overtime_cap: 100.0,
            workload_normalizer: 80.0,
            high_performer_sensitivity: 1.5,
            probability_policy: ProbabilityPolicy::Clamp,
        }
    }
}

impl AttritionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_rate >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "attrition.base_rate",
            });
        }
        if !(self.financial_weight >= 0.0 && self.workload_weight >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "attrition.weights",
            });
        }
        if !(self.workload_normalizer > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "attrition.workload_normalizer",
            });
        }
        if !(self.overtime_cap > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "attrition.overtime_cap",
            });
        }
        if !(self.high_performer_sensitivity >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "attrition.high_performer_sensitivity",
            });
        }
        Ok(())
    }
}

/// One sampled resignation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resignation {
    /// Index of the employee in the population vector
    pub index: usize,
    pub employee_id: u32,
    /// Probability the draw was compared against (after the policy)
    pub probability: f64,
}

/// Computes resignation probabilities and samples leavers
#[derive(Debug, Clone)]
pub struct AttritionModel {
    config: AttritionConfig,
}

impl AttritionModel {
    pub fn new(config: AttritionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AttritionConfig {
        &self.config
    }

    /// Replace the baseline monthly rate
    pub fn set_base_rate(&mut self, base_rate: f64) {
        self.config.base_rate = base_rate;
    }

    pub fn financial_risk(&self, employee: &Employee) -> f64 {
        (self.config.compa_target - employee.compa_ratio()).max(0.0)
    }

    pub fn workload_risk(&self, employee: &Employee) -> f64 {
        let sensitivity = if employee.is_high_performer() {
            self.config.high_performer_sensitivity
        } else {
            1.0
        };
        (employee.overtime_hours().min(self.config.overtime_cap) / self.config.workload_normalizer)
            * sensitivity
    }

    /// Monthly resignation probability after the configured policy
    pub fn resignation_probability(&self, employee: &Employee) -> f64 {
        let raw = self.config.base_rate
            + self.financial_risk(employee) * self.config.financial_weight
            + self.workload_risk(employee) * self.config.workload_weight;

        match self.config.probability_policy {
            ProbabilityPolicy::Clamp => raw.clamp(0.0, 1.0),
            ProbabilityPolicy::Unbounded => raw,
        }
    }

    /// Draw once per active employee, in population order
    ///
    /// Resigned employees consume no draw. Returned resignations are not yet
    /// applied; the caller marks them resigned and opens their vacancies.
    pub fn sample_resignations(
        &self,
        employees: &[Employee],
        rng: &mut RngManager,
    ) -> Vec<Resignation> {
        employees
            .iter()
            .enumerate()
            .filter(|(_, employee)| employee.is_active())
            .filter_map(|(index, employee)| {
                let probability = self.resignation_probability(employee);
                (rng.next_f64() < probability).then_some(Resignation {
                    index,
                    employee_id: employee.id(),
                    probability,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::{Branch, EmployeeProfile, PerformanceRating};

    fn employee(compa_ratio: f64, overtime: f64, hp: bool) -> Employee {
        Employee::new(
            1,
            EmployeeProfile {
                age: 40,
                tenure_years: 15,
                job_level: 3,
                rating: if hp { PerformanceRating::A } else { PerformanceRating::B },
                branch: Branch::Urban,
                salary: compa_ratio * 1_000.0,
                market_salary: 1_000.0,
                is_high_performer: hp,
                absorption_factor: 1.0,
                overtime_hours: overtime,
            },
        )
    }

    #[test]
    fn test_workload_risk_capped_at_overtime_cap() {
        let model = AttritionModel::new(AttritionConfig::default());
        let at_cap = model.workload_risk(&employee(1.0, 100.0, false));
        let above_cap = model.workload_risk(&employee(1.0, 150.0, false));
        assert_eq!(at_cap, above_cap);
        assert!((at_cap - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_policy_bounds_probability() {
        let config = AttritionConfig {
            financial_weight: 10.0,
            ..Default::default()
        };
        let model = AttritionModel::new(config.clone());
        let e = employee(0.2, 20.0, false);
        assert_eq!(model.resignation_probability(&e), 1.0);

        let unbounded = AttritionModel::new(AttritionConfig {
            probability_policy: ProbabilityPolicy::Unbounded,
            ..config
        });
        assert!(unbounded.resignation_probability(&e) > 1.0);
    }
}
