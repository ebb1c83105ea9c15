//! Per-trial financial accumulation
//!
//! Totals are kept in full currency units and only ever grow. Reported
//! figures divide by the reporting scale on the way out; nothing is ever
//! re-derived from the scaled values.

use crate::costs::rates::FinancialRates;
use crate::models::vacancy::Vacancy;
use crate::vacancy::Hire;

/// Costs incurred in a single month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    /// Recruitment fees plus wage markups of this month's hires
    pub cash_out: f64,
    /// Value forgone on positions still open this month
    pub opportunity_loss: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.cash_out + self.opportunity_loss
    }
}

/// Running cash-out and opportunity-loss totals of one trial
#[derive(Debug, Clone, Default)]
pub struct FinancialLedger {
    rates: FinancialRates,
    total_cash_out: f64,
    total_opportunity_loss: f64,
}

impl FinancialLedger {
    pub fn new(rates: FinancialRates) -> Self {
        Self {
            rates,
            total_cash_out: 0.0,
            total_opportunity_loss: 0.0,
        }
    }

    pub fn rates(&self) -> &FinancialRates {
        &self.rates
    }

    /// Book the cash-out of one hire; returns the amount booked
    pub fn record_hire(&mut self, hire: &Hire) -> f64 {
        let cost = self
            .rates
            .hire_cash_out(hire.vacancy.prior_salary(), hire.new_salary)
            .max(0.0);
        self.total_cash_out += cost;
        cost
    }

    /// Accrue one month of opportunity loss for every open vacancy
    pub fn accrue_open_vacancies<'a>(
        &mut self,
        vacancies: impl IntoIterator<Item = &'a Vacancy>,
    ) -> f64 {
        let accrued: f64 = vacancies
            .into_iter()
            .map(|v| self.rates.monthly_opportunity_loss(v.prior_salary()).max(0.0))
            .sum();
        self.total_opportunity_loss += accrued;
        accrued
    }

    /// Book a month: hires first, then open vacancies
    pub fn record_month<'a>(
        &mut self,
        hires: &[Hire],
        open: impl IntoIterator<Item = &'a Vacancy>,
    ) -> CostBreakdown {
        let cash_out = hires.iter().map(|hire| self.record_hire(hire)).sum();
        let opportunity_loss = self.accrue_open_vacancies(open);
        CostBreakdown {
            cash_out,
            opportunity_loss,
        }
    }

    /// Exact cumulative cash-out
    pub fn total_cash_out(&self) -> f64 {
        self.total_cash_out
    }

    /// Exact cumulative opportunity loss
    pub fn total_opportunity_loss(&self) -> f64 {
        self.total_opportunity_loss
    }

    /// Cumulative cash-out divided by the reporting scale
    pub fn reported_cash_out(&self) -> f64 {
        self.total_cash_out / self.rates.reporting_scale
    }

    pub fn reported_opportunity_loss(&self) -> f64 {
        self.total_opportunity_loss / self.rates.reporting_scale
    }
}
