//! Sensitivity analysis
//!
//! Two families of what-if studies:
//!
//! - **Simulated sweeps** re-run the full Monte Carlo on config variants
//!   (lead time per branch, spillover rate, replacement markup). Every variant
//!   reuses the base run's master seed, so the initial population and the
//!   trial seeds are shared and differences come from the parameter alone.
//! - **Analytic grid**: closed-form cash-out over turnover rate × premium,
//!   without simulation.

use crate::config::{ConfigError, SimulationConfig};
use crate::models::employee::Branch;
use crate::orchestrator::{AggregateResult, LossSummary, MonteCarloRunner, SimulationError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Lead-time offsets, in months, swept around the configured values
pub const DEFAULT_LEAD_TIME_DELTAS: [i64; 6] = [-2, -1, 0, 1, 2, 3];

pub const DEFAULT_SPILLOVER_RATES: [f64; 5] = [0.4, 0.5, 0.6, 0.7, 0.8];

/// Multipliers applied to every replacement markup (premium − 1)
pub const DEFAULT_MARKUP_FACTORS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// One variant of a simulated sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Human-readable variant label, e.g. `"rural +2"`
    pub label: String,
    /// Swept value as applied to the config
    pub value: f64,
    pub summary: LossSummary,
    /// Final median headcount over initial, per branch
    pub urban_retention_pct: f64,
    pub rural_retention_pct: f64,
}

impl SweepPoint {
    fn from_result(label: String, value: f64, result: &AggregateResult) -> Self {
        Self {
            label,
            value,
            summary: result.final_summary,
            urban_retention_pct: result.retention_pct.urban,
            rural_retention_pct: result.retention_pct.rural,
        }
    }
}

/// Lead-time sweep for one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeSweep {
    pub branch: Branch,
    pub base_lead_time: usize,
    pub points: Vec<SweepPoint>,
}

/// Pin the master seed so every variant shares population and trial seeds
fn pinned_base(base: &SimulationConfig) -> Result<SimulationConfig, SimulationError> {
    let runner = MonteCarloRunner::new(base.clone())?;
    let mut pinned = base.clone();
    pinned.rng_seed = Some(runner.master_seed());
    Ok(pinned)
}

/// Vary each branch's lead time by `deltas`, one branch at a time
///
/// Offsets that would push a lead time below one month are skipped.
pub fn lead_time_sweep(
    base: &SimulationConfig,
    deltas: &[i64],
) -> Result<Vec<LeadTimeSweep>, SimulationError> {
    let pinned = pinned_base(base)?;
    let mut sweeps = Vec::with_capacity(Branch::ALL.len());

    for branch in Branch::ALL {
        let base_lead_time = *pinned.hiring.lead_times.get(branch);
        let mut points = Vec::with_capacity(deltas.len());

        for &delta in deltas {
            let lead_time = base_lead_time as i64 + delta;
            if lead_time < 1 {
                continue;
            }
            let mut variant = pinned.clone();
            *variant.hiring.lead_times.get_mut(branch) = lead_time as usize;

            let result = MonteCarloRunner::new(variant)?.run()?;
            info!(%branch, delta, lead_time, total = result.final_summary.total, "lead-time variant");
            points.push(SweepPoint::from_result(
                format!("{} {:+}", branch.label(), delta),
                lead_time as f64,
                &result,
            ));
        }

        sweeps.push(LeadTimeSweep {
            branch,
            base_lead_time,
            points,
        });
    }

    Ok(sweeps)
}

/// Re-run with each spillover rate
pub fn spillover_sweep(
    base: &SimulationConfig,
    rates: &[f64],
) -> Result<Vec<SweepPoint>, SimulationError> {
    let pinned = pinned_base(base)?;
    rates
        .iter()
        .map(|&rate| {
            let mut variant = pinned.clone();
            variant.overtime.spillover_rate = rate;
            let result = MonteCarloRunner::new(variant)?.run()?;
            info!(rate, total = result.final_summary.total, "spillover variant");
            Ok(SweepPoint::from_result(format!("spillover {rate:.2}"), rate, &result))
        })
        .collect()
}

/// Re-run with every replacement markup scaled by each factor
pub fn premium_sweep(
    base: &SimulationConfig,
    factors: &[f64],
) -> Result<Vec<SweepPoint>, SimulationError> {
    let pinned = pinned_base(base)?;
    factors
        .iter()
        .map(|&factor| {
            let mut variant = pinned.clone();
            variant.hiring.replacement_premiums =
                pinned.hiring.replacement_premiums.with_markup_scaled(factor);
            let result = MonteCarloRunner::new(variant)?.run()?;
            info!(factor, total = result.final_summary.total, "premium variant");
            Ok(SweepPoint::from_result(format!("markup x{factor:.2}"), factor, &result))
        })
        .collect()
}

/// Inputs of the closed-form turnover × premium grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticGridConfig {
    pub headcount: f64,
    /// Horizon in years
    pub years: f64,
    /// Average annual salary, in the unit the grid is reported in
    pub avg_salary: f64,
    pub hiring_cost_rate: f64,
    /// Annual turnover rates (rows)
    pub turnover_rates: Vec<f64>,
    /// Salary premium of a replacement over its predecessor (columns)
    pub premiums: Vec<f64>,
}

impl Default for AnalyticGridConfig {
    fn default() -> Self {
        Self {
            headcount: 1000.0,
            years: 2.0,
            avg_salary: 6.0,
            hiring_cost_rate: 0.35,
            turnover_rates: vec![0.07, 0.12, 0.17, 0.22],
            premiums: vec![0.10, 0.20, 0.30, 0.40],
        }
    }
}

impl AnalyticGridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.headcount >= 0.0 && self.years >= 0.0 && self.avg_salary >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "grid.headcount/years/avg_salary",
            });
        }
        if !(self.hiring_cost_rate >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "grid.hiring_cost_rate",
            });
        }
        if self.turnover_rates.iter().chain(&self.premiums).any(|v| !(*v >= 0.0)) {
            return Err(ConfigError::NonPositive {
                field: "grid.turnover_rates/premiums",
            });
        }
        Ok(())
    }
}

/// Estimated cash-out per (turnover rate, premium)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOutGrid {
    pub turnover_rates: Vec<f64>,
    pub premiums: Vec<f64>,
    /// `cells[row][col]` for `turnover_rates[row]`, `premiums[col]`
    pub cells: Vec<Vec<f64>>,
}

impl CashOutGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// leavers = headcount × turnover × years;
/// cost per hire = salary × hiring rate + salary × premium
pub fn analytic_cash_out_grid(config: &AnalyticGridConfig) -> Result<CashOutGrid, ConfigError> {
    config.validate()?;

    let cells = config
        .turnover_rates
        .iter()
        .map(|turnover| {
            let leavers = config.headcount * turnover * config.years;
            config
                .premiums
                .iter()
                .map(|premium| {
                    let per_hire = config.avg_salary * config.hiring_cost_rate
                        + config.avg_salary * premium;
                    leavers * per_hire
                })
                .collect()
        })
        .collect();

    Ok(CashOutGrid {
        turnover_rates: config.turnover_rates.clone(),
        premiums: config.premiums.clone(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_reference_cell() {
        let grid = analytic_cash_out_grid(&AnalyticGridConfig::default()).unwrap();
        // 1000 × 0.12 × 2 = 240 leavers; 6 × 0.35 + 6 × 0.20 = 3.3 per hire
        let cell = grid.get(1, 1).unwrap();
        assert!((cell - 792.0).abs() < 1e-9);
        assert_eq!(grid.cells.len(), 4);
        assert!(grid.cells.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn test_grid_monotone_in_both_axes() {
        let grid = analytic_cash_out_grid(&AnalyticGridConfig::default()).unwrap();
        for row in 0..4 {
            for col in 1..4 {
                assert!(grid.get(row, col).unwrap() > grid.get(row, col - 1).unwrap());
            }
        }
        for col in 0..4 {
            for row in 1..4 {
                assert!(grid.get(row, col).unwrap() > grid.get(row - 1, col).unwrap());
            }
        }
    }

    #[test]
    fn test_grid_rejects_negative_rate() {
        let config = AnalyticGridConfig {
            turnover_rates: vec![-0.1],
            ..Default::default()
        };
        assert!(analytic_cash_out_grid(&config).is_err());
    }
}
