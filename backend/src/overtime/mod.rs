//! Overtime cascade
//!
//! Redistributes workload after departures and hires, touching active
//! employees only:
//!
//! 1. **Spillover**: each leaver contributes
//!    `(baseline_hours + min(overtime, spillover_overtime_cap)) × spillover_rate`
//!    to a pool, shared out in proportion to absorption factor.
//! 2. **Relief**: each hire removes `relief_hours_per_hire / active_headcount`
//!    hours from every active employee, never below `floor_hours`.
//! 3. **Clamp**: overtime ends the month inside `[floor_hours, ceiling_hours]`.
//!
//! Every step is a no-op when there is nobody to receive it.

use crate::config::ConfigError;
use crate::models::employee::Employee;
use serde::{Deserialize, Serialize};

/// Workload redistribution parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeConfig {
    /// Regular monthly hours of a position
    pub baseline_hours: f64,
    /// Share of a leaver's workload that lands on colleagues
    pub spillover_rate: f64,
    /// Leaver overtime counted toward spillover is capped here
    pub spillover_overtime_cap: f64,
    /// Overtime hours one hire takes off the team in total
    pub relief_hours_per_hire: f64,
    pub floor_hours: f64,
    pub ceiling_hours: f64,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            baseline_hours: 160.0,
            spillover_rate: 0.6,
            spillover_overtime_cap: 100.0,
            relief_hours_per_hire: 120.0,
            floor_hours: 20.0,
            ceiling_hours: 120.0,
        }
    }
}

impl OvertimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.floor_hours >= 0.0 && self.floor_hours <= self.ceiling_hours) {
            return Err(ConfigError::InvalidRange {
                field: "overtime.floor_hours..ceiling_hours",
                min: self.floor_hours,
                max: self.ceiling_hours,
            });
        }
        if !(self.spillover_rate >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "overtime.spillover_rate",
            });
        }
        if !(self.baseline_hours >= 0.0 && self.relief_hours_per_hire >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "overtime.hours",
            });
        }
        Ok(())
    }
}

/// What the cascade did in one month
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CascadeOutcome {
    /// Hours shared out (0 when nobody could absorb them)
    pub spillover_distributed: f64,
    /// Hours removed per active employee by hires (before the floor)
    pub relief_per_head: f64,
    pub active_headcount: usize,
}

/// Applies spillover, relief and clamping
#[derive(Debug, Clone)]
pub struct OvertimeCascade {
    config: OvertimeConfig,
}

impl OvertimeCascade {
    pub fn new(config: OvertimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OvertimeConfig {
        &self.config
    }

    pub fn set_spillover_rate(&mut self, rate: f64) {
        self.config.spillover_rate = rate;
    }

    /// Workload a departing employee leaves behind
    pub fn spillover_contribution(&self, leaver: &Employee) -> f64 {
        (self.config.baseline_hours
            + leaver.overtime_hours().min(self.config.spillover_overtime_cap))
            * self.config.spillover_rate
    }

    /// Share `pool` hours among active employees by absorption factor
    ///
    /// Returns the hours actually distributed.
    pub fn distribute_spillover(&self, employees: &mut [Employee], pool: f64) -> f64 {
        if pool <= 0.0 {
            return 0.0;
        }
        let total_absorption: f64 = employees
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.absorption_factor())
            .sum();
        if total_absorption <= 0.0 {
            return 0.0;
        }

        for employee in employees.iter_mut().filter(|e| e.is_active()) {
            let share = employee.absorption_factor() / total_absorption * pool;
            employee.set_overtime_hours(employee.overtime_hours() + share);
        }
        pool
    }

    /// Remove an equal per-head relief for `hires` completed hires
    ///
    /// Returns the per-head relief, 0 when there are no hires or nobody active.
    pub fn apply_hire_relief(&self, employees: &mut [Employee], hires: usize) -> f64 {
        let active = employees.iter().filter(|e| e.is_active()).count();
        if hires == 0 || active == 0 {
            return 0.0;
        }

        let relief = hires as f64 * self.config.relief_hours_per_hire / active as f64;
        for employee in employees.iter_mut().filter(|e| e.is_active()) {
            let reduced = (employee.overtime_hours() - relief).max(self.config.floor_hours);
            employee.set_overtime_hours(reduced);
        }
        relief
    }

    /// Keep every active employee inside `[floor_hours, ceiling_hours]`
    pub fn clamp(&self, employees: &mut [Employee]) {
        for employee in employees.iter_mut().filter(|e| e.is_active()) {
            let clamped = employee
                .overtime_hours()
                .clamp(self.config.floor_hours, self.config.ceiling_hours);
            employee.set_overtime_hours(clamped);
        }
    }

    /// Spillover, then relief, then clamp
    pub fn apply(&self, employees: &mut [Employee], pool: f64, hires: usize) -> CascadeOutcome {
        let spillover_distributed = self.distribute_spillover(employees, pool);
        let relief_per_head = self.apply_hire_relief(employees, hires);
        self.clamp(employees);
        CascadeOutcome {
            spillover_distributed,
            relief_per_head,
            active_headcount: employees.iter().filter(|e| e.is_active()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_band_rejected() {
        let config = OvertimeConfig {
            floor_hours: 50.0,
            ceiling_hours: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_empty_workforce_is_noop() {
        let cascade = OvertimeCascade::new(OvertimeConfig::default());
        let mut employees: Vec<Employee> = Vec::new();
        let outcome = cascade.apply(&mut employees, 500.0, 3);
        assert_eq!(outcome, CascadeOutcome::default());
    }
}
