//! Financial rate configuration

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Rates used to price turnover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRates {
    /// Recruitment fee as a share of the replacement's salary
    pub hiring_cost_rate: f64,
    /// Labor share of value added; salary ÷ labor_share approximates the
    /// value a filled position produces per year
    pub labor_share: f64,
    /// Divisor applied to totals in reported histories (1,000,000 = millions)
    pub reporting_scale: f64,
}

impl Default for FinancialRates {
    fn default() -> Self {
        Self {
            hiring_cost_rate: 0.35,
            labor_share: 0.50,
            reporting_scale: 1_000_000.0,
        }
    }
}

impl FinancialRates {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hiring_cost_rate >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "financial.hiring_cost_rate",
            });
        }
        if !(self.labor_share > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "financial.labor_share",
            });
        }
        if !(self.reporting_scale > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "financial.reporting_scale",
            });
        }
        Ok(())
    }

    /// Recruitment fee plus wage markup for one hire
    pub fn hire_cash_out(&self, prior_salary: f64, new_salary: f64) -> f64 {
        new_salary * self.hiring_cost_rate + (new_salary - prior_salary)
    }

    /// Value-added forgone for one month of an unfilled position
    pub fn monthly_opportunity_loss(&self, prior_salary: f64) -> f64 {
        prior_salary / self.labor_share / 12.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hire_cash_out() {
        let rates = FinancialRates::default();
        // 1.15M × 0.35 + 0.15M
        let cost = rates.hire_cash_out(1_000_000.0, 1_150_000.0);
        assert!((cost - 552_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_monthly_opportunity_loss() {
        let rates = FinancialRates::default();
        assert!((rates.monthly_opportunity_loss(6_000_000.0) - 1_000_000.0).abs() < 1e-6);
    }
}
