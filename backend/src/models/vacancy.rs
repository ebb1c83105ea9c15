//! Vacancy model
//!
//! A vacancy is the open position left behind by exactly one resignation.
//! It is destroyed when a replacement hire completes.

use crate::models::employee::{Branch, Employee, RatingTier};
use serde::{Deserialize, Serialize};

/// An open position awaiting a replacement hire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    /// Id of the employee whose departure opened this vacancy
    departed_employee_id: u32,
    branch: Branch,
    /// Month (tick index) the vacancy was opened
    opened_month: usize,
    /// Completed months without a hire
    months_open: usize,
    /// Salary of the departed employee
    prior_salary: f64,
    /// Rating tier of the departed employee
    prior_tier: RatingTier,
}

impl Vacancy {
    /// Open a vacancy for an employee resigning in `month`
    pub fn for_departure(employee: &Employee, month: usize) -> Self {
        Self::new(
            employee.id(),
            employee.branch(),
            month,
            employee.salary(),
            employee.rating().tier(),
        )
    }

    pub fn new(
        departed_employee_id: u32,
        branch: Branch,
        opened_month: usize,
        prior_salary: f64,
        prior_tier: RatingTier,
    ) -> Self {
        Self {
            departed_employee_id,
            branch,
            opened_month,
            months_open: 0,
            prior_salary,
            prior_tier,
        }
    }

    pub fn departed_employee_id(&self) -> u32 {
        self.departed_employee_id
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn opened_month(&self) -> usize {
        self.opened_month
    }

    pub fn months_open(&self) -> usize {
        self.months_open
    }

    pub fn prior_salary(&self) -> f64 {
        self.prior_salary
    }

    pub fn prior_tier(&self) -> RatingTier {
        self.prior_tier
    }

    /// Age by one month
    pub(crate) fn age(&mut self) {
        self.months_open += 1;
    }
}
