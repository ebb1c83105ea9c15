//! Cross-trial aggregation
//!
//! Every trial history is reduced month-by-month to the median of each
//! metric. The resulting [`AggregateResult`] is the only externally visible
//! output of a Monte Carlo run.

use crate::models::employee::{Branch, PerBranch};
use crate::models::history::{MonthRecord, TrialHistory};
use crate::orchestrator::engine::SimulationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Median of a sample; even counts average the two middle values
///
/// Sorts `values` in place. Returns `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Pointwise median of one metric across equally long histories
pub fn median_series(
    histories: &[TrialHistory],
    months: usize,
    metric: impl Fn(&MonthRecord) -> f64,
) -> Vec<f64> {
    let mut column = Vec::with_capacity(histories.len());
    (0..months)
        .map(|month| {
            column.clear();
            column.extend(histories.iter().map(|h| metric(&h.records()[month])));
            median(&mut column).unwrap_or(0.0)
        })
        .collect()
}

/// Run identity stamped onto every aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub config_hash: String,
    pub master_seed: u64,
    pub initial_headcount: PerBranch<usize>,
}

/// Final-month losses, in reporting units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LossSummary {
    pub cash_out: f64,
    pub opportunity_loss: f64,
    pub total: f64,
}

/// One month of the aggregate, flattened for tabular output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub month: usize,
    pub cash_out: f64,
    pub opportunity_loss: f64,
    pub hp_overtime: f64,
    pub urban_headcount: f64,
    pub rural_headcount: f64,
}

/// Median series over all trials of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub run_id: Uuid,
    pub config_hash: String,
    pub master_seed: u64,
    pub num_trials: usize,
    /// Month indices, 0-based
    pub months: Vec<usize>,
    pub cash_out: Vec<f64>,
    pub opportunity_loss: Vec<f64>,
    pub hp_overtime: Vec<f64>,
    pub headcount: PerBranch<Vec<f64>>,
    pub resignations: Vec<f64>,
    pub hires: Vec<f64>,
    pub open_vacancies: Vec<f64>,
    pub initial_headcount: PerBranch<usize>,
    /// Final median headcount as a percentage of the initial headcount
    pub retention_pct: PerBranch<f64>,
    pub final_summary: LossSummary,
}

impl AggregateResult {
    /// Reduce trial histories to per-month medians
    ///
    /// # Errors
    ///
    /// `InconsistentHistories` if the trials did not all run the same number
    /// of months.
    pub fn from_histories(
        histories: &[TrialHistory],
        metadata: RunMetadata,
    ) -> Result<Self, SimulationError> {
        let months = histories.first().map(TrialHistory::len).unwrap_or(0);
        if let Some(bad) = histories.iter().find(|h| h.len() != months) {
            return Err(SimulationError::InconsistentHistories {
                expected: months,
                found: bad.len(),
            });
        }

        let cash_out = median_series(histories, months, |r| r.cumulative_cash_out);
        let opportunity_loss =
            median_series(histories, months, |r| r.cumulative_opportunity_loss);
        let headcount = PerBranch::from_fn(|branch| {
            median_series(histories, months, |r| *r.headcount.get(branch) as f64)
        });

        let retention_pct = PerBranch::from_fn(|branch| {
            let initial = *metadata.initial_headcount.get(branch);
            match headcount.get(branch).last() {
                Some(last) if initial > 0 => last * 100.0 / initial as f64,
                _ => 0.0,
            }
        });

        let final_cash = cash_out.last().copied().unwrap_or(0.0);
        let final_loss = opportunity_loss.last().copied().unwrap_or(0.0);

        Ok(Self {
            run_id: Uuid::new_v4(),
            config_hash: metadata.config_hash,
            master_seed: metadata.master_seed,
            num_trials: histories.len(),
            months: (0..months).collect(),
            hp_overtime: median_series(histories, months, |r| r.hp_overtime_avg),
            resignations: median_series(histories, months, |r| r.resignations as f64),
            hires: median_series(histories, months, |r| r.hires as f64),
            open_vacancies: median_series(histories, months, |r| r.open_vacancies as f64),
            cash_out,
            opportunity_loss,
            headcount,
            initial_headcount: metadata.initial_headcount,
            retention_pct,
            final_summary: LossSummary {
                cash_out: final_cash,
                opportunity_loss: final_loss,
                total: final_cash + final_loss,
            },
        })
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn headcount_for(&self, branch: Branch) -> &[f64] {
        self.headcount.get(branch)
    }

    /// Flatten the main series into one row per month
    pub fn rows(&self) -> Vec<AggregateRow> {
        self.months
            .iter()
            .enumerate()
            .map(|(i, &month)| AggregateRow {
                month,
                cash_out: self.cash_out[i],
                opportunity_loss: self.opportunity_loss[i],
                hp_overtime: self.hp_overtime[i],
                urban_headcount: self.headcount.urban[i],
                rural_headcount: self.headcount.rural[i],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: usize, cash: f64, urban: usize) -> MonthRecord {
        MonthRecord {
            month,
            hp_overtime_avg: 20.0,
            headcount: PerBranch::new(urban, 10),
            cumulative_cash_out: cash,
            cumulative_opportunity_loss: cash / 2.0,
            resignations: 0,
            hires: 0,
            open_vacancies: 0,
        }
    }

    fn history(values: &[(f64, usize)]) -> TrialHistory {
        let mut h = TrialHistory::new();
        for (month, &(cash, urban)) in values.iter().enumerate() {
            h.push(record(month, cash, urban));
        }
        h
    }

    fn metadata() -> RunMetadata {
        RunMetadata {
            config_hash: "abc".to_string(),
            master_seed: 1,
            initial_headcount: PerBranch::new(20, 10),
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn test_aggregate_takes_pointwise_median() {
        let histories = vec![
            history(&[(1.0, 20), (2.0, 18)]),
            history(&[(3.0, 19), (5.0, 16)]),
            history(&[(2.0, 20), (9.0, 15)]),
        ];
        let result = AggregateResult::from_histories(&histories, metadata()).unwrap();

        assert_eq!(result.months, vec![0, 1]);
        assert_eq!(result.cash_out, vec![2.0, 5.0]);
        assert_eq!(result.headcount.urban, vec![20.0, 16.0]);
        assert_eq!(result.retention_pct.urban, 80.0);
        assert_eq!(result.retention_pct.rural, 100.0);
        assert_eq!(result.final_summary.cash_out, 5.0);
        assert_eq!(result.final_summary.total, 7.5);
        assert_eq!(result.rows().len(), 2);
    }

    #[test]
    fn test_mismatched_histories_rejected() {
        let histories = vec![history(&[(1.0, 20)]), history(&[(1.0, 20), (2.0, 20)])];
        let err = AggregateResult::from_histories(&histories, metadata()).unwrap_err();
        assert_eq!(
            err,
            SimulationError::InconsistentHistories {
                expected: 1,
                found: 2
            }
        );
    }
}
