//! Vacancy ledger
//!
//! Owns the open positions of one trial. Each month:
//!
//! 1. Resignations open new vacancies with `open`; they sit in a pending
//!    list at `months_open = 0` and are not eligible this month.
//! 2. `resolve` ages every eligible vacancy by one month and converts those
//!    whose counter has reached their branch lead time into a [`Hire`],
//!    removing them from the ledger in the same call.
//! 3. Pending vacancies then join the eligible set for the next month.
//!
//! A vacancy opened in month `t` is therefore filled in exactly month
//! `t + lead_time(branch)`.

use crate::config::{ConfigError, ReplacementPremiums};
use crate::models::employee::{Branch, PerBranch};
use crate::models::vacancy::Vacancy;
use serde::{Deserialize, Serialize};

/// Replacement hiring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiringConfig {
    /// Months a vacancy stays open before the replacement starts
    pub lead_times: PerBranch<usize>,
    /// Salary multiplier for the replacement, by departed rating tier
    pub replacement_premiums: ReplacementPremiums,
}

impl Default for HiringConfig {
    fn default() -> Self {
        Self {
            lead_times: PerBranch::new(5, 10),
            replacement_premiums: ReplacementPremiums::default(),
        }
    }
}

impl HiringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for branch in Branch::ALL {
            if *self.lead_times.get(branch) == 0 {
                return Err(ConfigError::InvalidLeadTime { branch });
            }
        }
        self.replacement_premiums.validate()
    }
}

/// A completed replacement hire
#[derive(Debug, Clone, PartialEq)]
pub struct Hire {
    pub month: usize,
    /// The vacancy this hire filled
    pub vacancy: Vacancy,
    /// Prior salary × replacement premium
    pub new_salary: f64,
}

impl Hire {
    /// Salary increase over the departed employee
    pub fn wage_markup(&self) -> f64 {
        self.new_salary - self.vacancy.prior_salary()
    }
}

/// Open vacancies of one trial
#[derive(Debug, Clone, Default)]
pub struct VacancyLedger {
    /// Vacancies eligible for aging and resolution
    open: Vec<Vacancy>,
    /// Vacancies opened this month
    pending: Vec<Vacancy>,
}

impl VacancyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vacancy opened this month
    pub fn open(&mut self, vacancy: Vacancy) {
        self.pending.push(vacancy);
    }

    /// Insert a vacancy carried over from before the current month
    ///
    /// It ages and may resolve on the very next `resolve` call.
    pub fn carry_over(&mut self, vacancy: Vacancy) {
        self.open.push(vacancy);
    }

    /// Age eligible vacancies and convert those that reached their lead time
    ///
    /// # Errors
    /// Propagates a missing replacement premium for a departed tier.
    pub fn resolve(
        &mut self,
        month: usize,
        hiring: &HiringConfig,
    ) -> Result<Vec<Hire>, ConfigError> {
        let mut hires = Vec::new();
        let mut still_open = Vec::with_capacity(self.open.len() + self.pending.len());

        for mut vacancy in self.open.drain(..) {
            vacancy.age();
            if vacancy.months_open() >= *hiring.lead_times.get(vacancy.branch()) {
                let premium = hiring.replacement_premiums.premium(vacancy.prior_tier())?;
                let new_salary = vacancy.prior_salary() * premium;
                hires.push(Hire {
                    month,
                    vacancy,
                    new_salary,
                });
            } else {
                still_open.push(vacancy);
            }
        }

        still_open.append(&mut self.pending);
        self.open = still_open;
        Ok(hires)
    }

    /// Every unfilled vacancy, eligible and pending
    pub fn iter(&self) -> impl Iterator<Item = &Vacancy> {
        self.open.iter().chain(self.pending.iter())
    }

    pub fn len(&self) -> usize {
        self.open.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unfilled vacancies per branch
    pub fn count_by_branch(&self) -> PerBranch<usize> {
        let mut counts = PerBranch::new(0usize, 0usize);
        for vacancy in self.iter() {
            *counts.get_mut(vacancy.branch()) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::RatingTier;

    #[test]
    fn test_pending_vacancy_not_aged_in_opening_month() {
        let mut ledger = VacancyLedger::new();
        ledger.open(Vacancy::new(1, Branch::Urban, 0, 1000.0, RatingTier::B));

        let hires = ledger.resolve(0, &HiringConfig::default()).unwrap();
        assert!(hires.is_empty());
        assert_eq!(ledger.iter().next().unwrap().months_open(), 0);
    }

    #[test]
    fn test_zero_lead_time_rejected() {
        let config = HiringConfig {
            lead_times: PerBranch::new(0, 10),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLeadTime {
                branch: Branch::Urban
            })
        );
    }
}
