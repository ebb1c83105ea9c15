//! Population synthesis
//!
//! Builds the fixed-size initial workforce every trial starts from. All
//! sampling goes through the caller's [`RngManager`], so the same seed and
//! configuration always yield the same population.
//!
//! # Sampling rules
//!
//! - Age: uniform integer in `[age_min, age_max)`
//! - Tenure: `max(0, age - career_start_age - offset)`, offset uniform in
//!   `[0, tenure_offset_max)`
//! - Job level: `clamp((age - 20) / 8, 1, 5)` plus categorical noise, clamped
//! - Rating and branch: weighted categorical draws
//! - Salaries: linear internal pay, market pay from level base × rating
//!   multiplier, both scaled by `salary_unit`
//!
//! # Example
//!
//! ```
//! use workforce_simulator_core_rs::population::{PopulationConfig, PopulationGenerator};
//! use workforce_simulator_core_rs::{RatingTable, RngManager};
//!
//! let config = PopulationConfig::default();
//! let table = RatingTable::default();
//! let generator = PopulationGenerator::new(&config, &table).unwrap();
//!
//! let mut rng = RngManager::new(42);
//! let employees = generator.generate(100, &mut rng);
//! assert_eq!(employees.len(), 100);
//! assert!(employees.iter().all(|e| (1..=5).contains(&e.job_level())));
//! ```

use crate::config::{ConfigError, RatingParams, RatingTable};
use crate::models::employee::{Branch, Employee, EmployeeProfile, PerBranch, PerformanceRating};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution parameters for the synthesized workforce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Youngest age (inclusive)
    pub age_min: u32,
    /// Oldest age (exclusive)
    pub age_max: u32,
    /// Age at which tenure starts accruing
    pub career_start_age: u32,
    /// Tenure offset is drawn from `[0, tenure_offset_max)`
    pub tenure_offset_max: u32,
    /// Weights for job-level noise of −1, 0, +1
    pub job_level_noise_weights: [f64; 3],
    /// Branch sampling weights
    pub branch_weights: PerBranch<f64>,
    /// Internal pay = intercept + age·a + tenure·t + level·l (in salary units)
    pub salary_intercept: f64,
    pub salary_per_age_year: f64,
    pub salary_per_tenure_year: f64,
    pub salary_per_job_level: f64,
    /// Market base pay per job level (in salary units)
    pub market_base_by_level: BTreeMap<u8, f64>,
    /// Currency multiplier applied to salary units (10,000 yen)
    pub salary_unit: f64,
    /// Starting overtime hours for everyone
    pub initial_overtime_hours: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            age_min: 22,
            age_max: 60,
            career_start_age: 22,
            tenure_offset_max: 5,
            job_level_noise_weights: [0.2, 0.6, 0.2],
            branch_weights: PerBranch::new(0.6, 0.4),
            salary_intercept: 300.0,
            salary_per_age_year: 6.0,
            salary_per_tenure_year: 4.0,
            salary_per_job_level: 40.0,
            market_base_by_level: BTreeMap::from([
                (1, 350.0),
                (2, 500.0),
                (3, 700.0),
                (4, 900.0),
                (5, 1200.0),
            ]),
            salary_unit: 10_000.0,
            initial_overtime_hours: 20.0,
        }
    }
}

impl PopulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.age_min >= self.age_max {
            return Err(ConfigError::InvalidRange {
                field: "population.age",
                min: self.age_min as f64,
                max: self.age_max as f64,
            });
        }
        if self.tenure_offset_max == 0 {
            return Err(ConfigError::NonPositive {
                field: "population.tenure_offset_max",
            });
        }
        let noise = &self.job_level_noise_weights;
        if noise.iter().any(|w| !(*w >= 0.0)) || !(noise.iter().sum::<f64>() > 0.0) {
            return Err(ConfigError::InvalidWeights {
                field: "population.job_level_noise_weights",
            });
        }
        let branch = &self.branch_weights;
        if !(branch.urban >= 0.0 && branch.rural >= 0.0 && branch.urban + branch.rural > 0.0) {
            return Err(ConfigError::InvalidWeights {
                field: "population.branch_weights",
            });
        }
        for level in 1..=5u8 {
            match self.market_base_by_level.get(&level) {
                Some(base) if *base > 0.0 => {}
                Some(_) => {
                    return Err(ConfigError::NonPositive {
                        field: "population.market_base_by_level",
                    })
                }
                None => {
                    return Err(ConfigError::Missing {
                        table: "market_base_by_level",
                        key: level.to_string(),
                    })
                }
            }
        }
        if !(self.salary_unit > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "population.salary_unit",
            });
        }
        if !(self.initial_overtime_hours >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "population.initial_overtime_hours",
            });
        }
        Ok(())
    }

    /// Internal pay in salary units
    pub fn internal_salary_units(&self, age: u32, tenure_years: u32, job_level: u8) -> f64 {
        self.salary_intercept
            + self.salary_per_age_year * age as f64
            + self.salary_per_tenure_year * tenure_years as f64
            + self.salary_per_job_level * job_level as f64
    }
}

/// Synthesizes the initial workforce
///
/// Table lookups are resolved once in [`PopulationGenerator::new`]; sampling
/// itself cannot fail.
pub struct PopulationGenerator<'a> {
    config: &'a PopulationConfig,
    /// Ratings with their parameters, in scale order
    ratings: Vec<(PerformanceRating, RatingParams)>,
    rating_weights: Vec<f64>,
    /// Market base pay for job levels 1..=5
    market_base: [f64; 5],
}

impl<'a> PopulationGenerator<'a> {
    /// Create a generator, validating both tables up front
    pub fn new(config: &'a PopulationConfig, table: &RatingTable) -> Result<Self, ConfigError> {
        config.validate()?;
        table.validate()?;

        let ratings = PerformanceRating::ALL
            .iter()
            .map(|rating| Ok((*rating, *table.params(*rating)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let rating_weights = ratings.iter().map(|(_, params)| params.weight).collect();

        let mut market_base = [0.0; 5];
        for (slot, level) in market_base.iter_mut().zip(1..=5u8) {
            *slot = *config
                .market_base_by_level
                .get(&level)
                .ok_or_else(|| ConfigError::Missing {
                    table: "market_base_by_level",
                    key: level.to_string(),
                })?;
        }

        Ok(Self {
            config,
            ratings,
            rating_weights,
            market_base,
        })
    }

    /// Generate `size` employees with ids `0..size`
    pub fn generate(&self, size: usize, rng: &mut RngManager) -> Vec<Employee> {
        (0..size)
            .map(|id| self.generate_one(id as u32, rng))
            .collect()
    }

    fn generate_one(&self, id: u32, rng: &mut RngManager) -> Employee {
        let cfg = self.config;

        let age = rng.range(cfg.age_min as i64, cfg.age_max as i64) as u32;
        let offset = rng.range(0, cfg.tenure_offset_max as i64) as u32;
        let tenure_years = age.saturating_sub(cfg.career_start_age).saturating_sub(offset);
        let job_level = self.sample_job_level(age, rng);

        let (rating, params) = self.ratings[rng.weighted_index(&self.rating_weights)];

        let branch_weights = [cfg.branch_weights.urban, cfg.branch_weights.rural];
        let branch = Branch::ALL[rng.weighted_index(&branch_weights)];

        let salary = cfg.internal_salary_units(age, tenure_years, job_level) * cfg.salary_unit;
        let market_salary = self.market_base[job_level as usize - 1]
            * params.performance_multiplier
            * cfg.salary_unit;

        Employee::new(
            id,
            EmployeeProfile {
                age,
                tenure_years,
                job_level,
                rating,
                branch,
                salary,
                market_salary,
                is_high_performer: params.high_performer,
                absorption_factor: params.absorption,
                overtime_hours: cfg.initial_overtime_hours,
            },
        )
    }

    /// Age-driven level with −1/0/+1 noise, clamped to [1, 5]
    fn sample_job_level(&self, age: u32, rng: &mut RngManager) -> u8 {
        let base = ((age as i64 - 20) / 8).clamp(1, 5);
        let noise = rng.weighted_index(&self.config.job_level_noise_weights) as i64 - 1;
        (base + noise).clamp(1, 5) as u8
    }
}

/// Active headcount per branch
pub fn headcount_by_branch(employees: &[Employee]) -> PerBranch<usize> {
    let mut counts = PerBranch::new(0usize, 0usize);
    for employee in employees.iter().filter(|e| e.is_active()) {
        *counts.get_mut(employee.branch()) += 1;
    }
    counts
}
