//! Workforce Simulator Core - Rust Engine
//!
//! Monte Carlo simulation of employee attrition, replacement hiring, and the
//! overtime and financial cascade that follows, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Month clock
//! - **models**: Domain types (Employee, Vacancy, Event, State, History)
//! - **config**: Simulation configuration and rating tables
//! - **population**: Synthetic workforce generation
//! - **attrition**: Resignation probability and sampling
//! - **vacancy**: Vacancy ledger and hire resolution
//! - **overtime**: Spillover, hire relief, clamping
//! - **costs**: Cash-out and opportunity-loss accounting
//! - **events**: Scheduled scenario events
//! - **orchestrator**: Trial loop, Monte Carlo runner, aggregation
//! - **sensitivity**: Parameter sweeps and the analytic cost grid
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Employees only move Active -> Resigned
//! 2. Cumulative costs never decrease
//! 3. All randomness is deterministic (seeded RNG, one stream per trial)
//! 4. Active overtime stays within the configured band after every month

// Module declarations
pub mod attrition;
pub mod config;
pub mod core;
pub mod costs;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod overtime;
pub mod population;
pub mod rng;
pub mod sensitivity;
pub mod vacancy;

// Re-exports for convenience
pub use attrition::{AttritionConfig, AttritionModel, ProbabilityPolicy};
pub use config::{ConfigError, RatingTable, ReplacementPremiums, SimulationConfig};
pub use crate::core::time::MonthClock;
pub use costs::{CostBreakdown, FinancialLedger, FinancialRates};
pub use events::{EventSchedule, ScenarioEvent, ScheduledEvent};
pub use models::{
    employee::{
        Branch, Employee, EmployeeError, EmployeeProfile, EmployeeStatus, PerBranch,
        PerformanceRating, RatingTier,
    },
    event::{Event, EventLog},
    history::{MonthRecord, TrialHistory},
    state::SimulationState,
    vacancy::Vacancy,
};
pub use orchestrator::{
    AggregateResult, LossSummary, MonteCarloRunner, MonthResult, SimulationEngine,
    SimulationError,
};
pub use overtime::{OvertimeCascade, OvertimeConfig};
pub use population::{PopulationConfig, PopulationGenerator};
pub use rng::RngManager;
pub use vacancy::{Hire, HiringConfig, VacancyLedger};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn workforce_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::runner::PyMonteCarlo>()?;
    Ok(())
}
