//! Per-month trial metrics
//!
//! A [`TrialHistory`] is append-only: the engine pushes exactly one
//! [`MonthRecord`] per executed month.

use crate::models::employee::{Branch, PerBranch};
use serde::{Deserialize, Serialize};

/// Metrics captured at the end of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub month: usize,
    /// Mean overtime of active high performers (0 when none remain)
    pub hp_overtime_avg: f64,
    /// Active headcount per branch
    pub headcount: PerBranch<usize>,
    /// Cumulative cash-out, in reporting units
    pub cumulative_cash_out: f64,
    /// Cumulative opportunity loss, in reporting units
    pub cumulative_opportunity_loss: f64,
    pub resignations: usize,
    pub hires: usize,
    /// Vacancies still unfilled at month end
    pub open_vacancies: usize,
}

impl MonthRecord {
    pub fn total_headcount(&self) -> usize {
        self.headcount.urban + self.headcount.rural
    }
}

/// Ordered month records of one trial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialHistory {
    records: Vec<MonthRecord>,
}

impl TrialHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(months: usize) -> Self {
        Self {
            records: Vec::with_capacity(months),
        }
    }

    pub fn push(&mut self, record: MonthRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MonthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MonthRecord> {
        self.records.last()
    }

    /// Project one metric into a series
    pub fn series(&self, metric: impl Fn(&MonthRecord) -> f64) -> Vec<f64> {
        self.records.iter().map(metric).collect()
    }

    pub fn headcount_series(&self, branch: Branch) -> Vec<f64> {
        self.series(|r| *r.headcount.get(branch) as f64)
    }
}
