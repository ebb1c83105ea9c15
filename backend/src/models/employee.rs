//! Employee model
//!
//! One row per synthesized individual. Static attributes and the derived
//! compensation metrics are fixed at creation (except for scheduled
//! compensation adjustments); status and overtime evolve tick by tick.
//!
//! # Critical Invariants
//!
//! 1. Status only moves Active → Resigned, never back
//! 2. A resigned employee's overtime is frozen at its value on departure

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during employee state transitions
#[derive(Debug, Error, PartialEq)]
pub enum EmployeeError {
    #[error("Employee {id} has already resigned")]
    AlreadyResigned { id: u32 },
}

/// Branch category of an employee's workplace
///
/// The branch decides replacement lead time for the vacancy an employee
/// leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Urban,
    Rural,
}

impl Branch {
    /// Every branch, in reporting order
    pub const ALL: [Branch; 2] = [Branch::Urban, Branch::Rural];

    pub fn label(&self) -> &'static str {
        match self {
            Branch::Urban => "Urban",
            Branch::Rural => "Rural",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value held once per branch
///
/// Exhaustive by construction: there is no way to build a `PerBranch` that
/// misses a branch, so lookups never fail.
///
/// # Example
/// ```
/// use workforce_simulator_core_rs::{Branch, PerBranch};
///
/// let lead_times = PerBranch::new(5, 10);
/// assert_eq!(*lead_times.get(Branch::Rural), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PerBranch<T> {
    pub urban: T,
    pub rural: T,
}

impl<T> PerBranch<T> {
    pub fn new(urban: T, rural: T) -> Self {
        Self { urban, rural }
    }

    /// Build by evaluating `f` for each branch
    pub fn from_fn(mut f: impl FnMut(Branch) -> T) -> Self {
        Self {
            urban: f(Branch::Urban),
            rural: f(Branch::Rural),
        }
    }

    pub fn get(&self, branch: Branch) -> &T {
        match branch {
            Branch::Urban => &self.urban,
            Branch::Rural => &self.rural,
        }
    }

    pub fn get_mut(&mut self, branch: Branch) -> &mut T {
        match branch {
            Branch::Urban => &mut self.urban,
            Branch::Rural => &mut self.rural,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerBranch<U> {
        PerBranch {
            urban: f(&self.urban),
            rural: f(&self.rural),
        }
    }
}

/// Nine-step performance rating scale, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceRating {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

impl PerformanceRating {
    /// The full scale in ordinal order (best first)
    pub const ALL: [PerformanceRating; 9] = [
        PerformanceRating::S,
        PerformanceRating::APlus,
        PerformanceRating::A,
        PerformanceRating::AMinus,
        PerformanceRating::BPlus,
        PerformanceRating::B,
        PerformanceRating::BMinus,
        PerformanceRating::C,
        PerformanceRating::D,
    ];

    /// Top-level letter of the rating, used to price replacements
    pub fn tier(&self) -> RatingTier {
        match self {
            PerformanceRating::S => RatingTier::S,
            PerformanceRating::APlus | PerformanceRating::A | PerformanceRating::AMinus => {
                RatingTier::A
            }
            PerformanceRating::BPlus | PerformanceRating::B | PerformanceRating::BMinus => {
                RatingTier::B
            }
            PerformanceRating::C => RatingTier::C,
            PerformanceRating::D => RatingTier::D,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceRating::S => "S",
            PerformanceRating::APlus => "A+",
            PerformanceRating::A => "A",
            PerformanceRating::AMinus => "A-",
            PerformanceRating::BPlus => "B+",
            PerformanceRating::B => "B",
            PerformanceRating::BMinus => "B-",
            PerformanceRating::C => "C",
            PerformanceRating::D => "D",
        }
    }

    /// Parse a rating label such as `"A+"`
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rating| rating.label() == label)
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Top-level rating letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatingTier {
    S,
    A,
    B,
    C,
    D,
}

impl RatingTier {
    pub const ALL: [RatingTier; 5] = [
        RatingTier::S,
        RatingTier::A,
        RatingTier::B,
        RatingTier::C,
        RatingTier::D,
    ];
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    /// Terminal
    Resigned,
}

/// Attributes needed to create an [`Employee`]
///
/// The population generator fills this from its sampling rules; tests build
/// it directly to pin exact values.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeProfile {
    pub age: u32,
    pub tenure_years: u32,
    pub job_level: u8,
    pub rating: PerformanceRating,
    pub branch: Branch,
    /// Internal annual salary
    pub salary: f64,
    /// Market-equivalent annual salary for the same level and rating
    pub market_salary: f64,
    pub is_high_performer: bool,
    pub absorption_factor: f64,
    /// Starting monthly overtime hours
    pub overtime_hours: f64,
}

/// A single employee in the simulated workforce
///
/// # Example
/// ```
/// use workforce_simulator_core_rs::{Branch, Employee, EmployeeProfile, PerformanceRating};
///
/// let mut employee = Employee::new(7, EmployeeProfile {
///     age: 35,
///     tenure_years: 10,
///     job_level: 2,
///     rating: PerformanceRating::B,
///     branch: Branch::Urban,
///     salary: 6_000_000.0,
///     market_salary: 5_000_000.0,
///     is_high_performer: false,
///     absorption_factor: 1.0,
///     overtime_hours: 20.0,
/// });
///
/// assert!((employee.compa_ratio() - 1.2).abs() < 1e-12);
/// employee.resign().unwrap();
/// assert!(!employee.is_active());
/// assert!(employee.resign().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    id: u32,
    age: u32,
    tenure_years: u32,
    job_level: u8,
    rating: PerformanceRating,
    branch: Branch,
    salary: f64,
    market_salary: f64,
    compa_ratio: f64,
    is_high_performer: bool,
    absorption_factor: f64,
    status: EmployeeStatus,
    overtime_hours: f64,
}

impl Employee {
    /// Create an active employee; compa-ratio is derived from the profile
    pub fn new(id: u32, profile: EmployeeProfile) -> Self {
        let compa_ratio = compa_ratio(profile.salary, profile.market_salary);
        Self {
            id,
            age: profile.age,
            tenure_years: profile.tenure_years,
            job_level: profile.job_level,
            rating: profile.rating,
            branch: profile.branch,
            salary: profile.salary,
            market_salary: profile.market_salary,
            compa_ratio,
            is_high_performer: profile.is_high_performer,
            absorption_factor: profile.absorption_factor,
            status: EmployeeStatus::Active,
            overtime_hours: profile.overtime_hours,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn tenure_years(&self) -> u32 {
        self.tenure_years
    }

    pub fn job_level(&self) -> u8 {
        self.job_level
    }

    pub fn rating(&self) -> PerformanceRating {
        self.rating
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn market_salary(&self) -> f64 {
        self.market_salary
    }

    /// Internal salary ÷ market salary; below 1 means underpaid
    pub fn compa_ratio(&self) -> f64 {
        self.compa_ratio
    }

    pub fn is_high_performer(&self) -> bool {
        self.is_high_performer
    }

    pub fn absorption_factor(&self) -> f64 {
        self.absorption_factor
    }

    pub fn status(&self) -> EmployeeStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    pub fn overtime_hours(&self) -> f64 {
        self.overtime_hours
    }

    /// Set monthly overtime hours
    pub fn set_overtime_hours(&mut self, hours: f64) {
        self.overtime_hours = hours;
    }

    /// Mark the employee as resigned
    ///
    /// # Errors
    /// `AlreadyResigned` if the employee left in an earlier tick.
    pub fn resign(&mut self) -> Result<(), EmployeeError> {
        if self.status == EmployeeStatus::Resigned {
            return Err(EmployeeError::AlreadyResigned { id: self.id });
        }
        self.status = EmployeeStatus::Resigned;
        Ok(())
    }

    /// Scale internal salary by `multiplier` and recompute the compa-ratio
    pub fn adjust_salary(&mut self, multiplier: f64) {
        self.salary *= multiplier;
        self.compa_ratio = compa_ratio(self.salary, self.market_salary);
    }
}

fn compa_ratio(salary: f64, market_salary: f64) -> f64 {
    if market_salary > 0.0 {
        salary / market_salary
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_tiers() {
        assert_eq!(PerformanceRating::S.tier(), RatingTier::S);
        assert_eq!(PerformanceRating::AMinus.tier(), RatingTier::A);
        assert_eq!(PerformanceRating::BPlus.tier(), RatingTier::B);
        assert_eq!(PerformanceRating::D.tier(), RatingTier::D);
    }

    #[test]
    fn test_rating_labels_round_trip() {
        for rating in PerformanceRating::ALL {
            assert_eq!(PerformanceRating::from_label(rating.label()), Some(rating));
        }
        assert_eq!(PerformanceRating::from_label("E"), None);
    }

    #[test]
    fn test_rating_serializes_as_label() {
        let json = serde_json::to_string(&PerformanceRating::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
    }

    #[test]
    fn test_per_branch_lookup() {
        let mut counts = PerBranch::new(3usize, 4usize);
        *counts.get_mut(Branch::Urban) += 1;
        assert_eq!(*counts.get(Branch::Urban), 4);
        assert_eq!(counts.map(|c| c * 2), PerBranch::new(8, 8));
    }
}
