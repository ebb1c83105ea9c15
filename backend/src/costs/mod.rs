//! Turnover costs
//!
//! - Rate configuration (`FinancialRates`)
//! - Per-trial running totals (`FinancialLedger`)

pub mod ledger;
pub mod rates;

pub use ledger::{CostBreakdown, FinancialLedger};
pub use rates::FinancialRates;
