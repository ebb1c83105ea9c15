//! Orchestrator - trial loop and Monte Carlo driver
//!
//! - `engine`: one trial, month by month
//! - `monte_carlo`: N trials from a shared initial population
//! - `aggregate`: per-month medians across trials

pub mod aggregate;
pub mod engine;
pub mod monte_carlo;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use aggregate::{median, AggregateResult, AggregateRow, LossSummary, RunMetadata};
pub use engine::{MonthResult, SimulationEngine, SimulationError};
pub use monte_carlo::MonteCarloRunner;
