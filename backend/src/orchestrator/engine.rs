//! Simulation Engine - one Monte Carlo trial
//!
//! Drives a private [`SimulationState`] through a fixed number of monthly
//! ticks and records one [`MonthRecord`] per month.
//!
//! # Architecture
//!
//! ```text
//! For each month t (0..num_months):
//! 0. Apply scheduled scenario events
//! 1. Attrition: draw resignations, mark Resigned, open one vacancy each
//! 2. Hiring: age vacancies, resolve those at lead time into hires,
//!    book cash-out and opportunity loss
//! 3. Cascade: spillover from leavers, then relief from hires
//! 4. Clamp overtime into [floor, ceiling]
//! 5. Record metrics
//! 6. Advance the clock
//! ```
//!
//! The loop always runs to the configured horizon; losing every employee is
//! not a terminal condition.
//!
//! # Example
//!
//! ```rust
//! use workforce_simulator_core_rs::{
//!     population::PopulationGenerator, RngManager, SimulationConfig, SimulationEngine,
//! };
//!
//! let config = SimulationConfig {
//!     num_employees: 100,
//!     num_months: 12,
//!     ..Default::default()
//! };
//!
//! let mut rng = RngManager::new(42);
//! let population = PopulationGenerator::new(&config.population, &config.rating_table)
//!     .unwrap()
//!     .generate(config.num_employees, &mut rng);
//!
//! let mut engine = SimulationEngine::new(&config, population, RngManager::new(7)).unwrap();
//! for _ in 0..12 {
//!     let result = engine.tick().unwrap();
//!     println!("Month {}: {} resignations, {} hires",
//!              result.record.month, result.record.resignations, result.record.hires);
//! }
//! assert!(engine.is_complete());
//! ```

use crate::attrition::AttritionModel;
use crate::config::{ConfigError, SimulationConfig};
use crate::core::time::MonthClock;
use crate::costs::CostBreakdown;
use crate::events::{ScenarioContext, ScenarioError, ScenarioEventHandler};
use crate::models::employee::{Employee, EmployeeError};
use crate::models::event::Event;
use crate::models::history::{MonthRecord, TrialHistory};
use crate::models::state::SimulationState;
use crate::models::vacancy::Vacancy;
use crate::overtime::{CascadeOutcome, OvertimeCascade};
use crate::rng::RngManager;
use crate::vacancy::HiringConfig;
use thiserror::Error;
use tracing::trace;

/// Simulation error types
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Scenario event failed: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Employee state error: {0}")]
    Employee(#[from] EmployeeError),

    #[error("Horizon of {horizon} months already completed")]
    HorizonExhausted { horizon: usize },

    #[error("Trial histories disagree in length: expected {expected}, found {found}")]
    InconsistentHistories { expected: usize, found: usize },
}

/// Result of a single month
#[derive(Debug, Clone)]
pub struct MonthResult {
    /// Metrics appended to the trial history
    pub record: MonthRecord,
    /// Costs booked this month (full currency units)
    pub costs: CostBreakdown,
    pub cascade: CascadeOutcome,
}

/// Runs one trial over a private copy of the workforce
///
/// # Determinism
///
/// All randomness comes from the `RngManager` passed to [`SimulationEngine::new`].
/// Same population + same config + same seed = identical history.
pub struct SimulationEngine {
    state: SimulationState,
    clock: MonthClock,
    rng: RngManager,
    attrition: AttritionModel,
    cascade: OvertimeCascade,
    /// Trial-local copy; scenario events may change lead times
    hiring: HiringConfig,
    scenarios: ScenarioEventHandler,
    history: TrialHistory,
}

impl SimulationEngine {
    /// Create an engine for one trial
    ///
    /// `population` is moved in; callers sharing a template pass a clone.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when any table or parameter fails validation.
    pub fn new(
        config: &SimulationConfig,
        population: Vec<Employee>,
        rng: RngManager,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let state = SimulationState::new(population, config.financial.clone())
            .with_event_recording(config.record_events);

        Ok(Self {
            state,
            clock: MonthClock::new(config.num_months),
            rng,
            attrition: AttritionModel::new(config.attrition.clone()),
            cascade: OvertimeCascade::new(config.overtime.clone()),
            hiring: config.hiring.clone(),
            scenarios: ScenarioEventHandler::new(config.scenario_events.clone()),
            history: TrialHistory::with_capacity(config.num_months),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Index of the next month to run
    pub fn current_month(&self) -> usize {
        self.clock.current_month()
    }

    pub fn is_complete(&self) -> bool {
        self.clock.is_complete()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable state access, primarily for tests that stage exact scenarios
    ///
    /// Direct mutation bypasses the tick's invariants. Use with caution.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn hiring(&self) -> &HiringConfig {
        &self.hiring
    }

    pub fn attrition(&self) -> &AttritionModel {
        &self.attrition
    }

    pub fn cascade(&self) -> &OvertimeCascade {
        &self.cascade
    }

    pub fn history(&self) -> &TrialHistory {
        &self.history
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one month
    ///
    /// # Errors
    ///
    /// `HorizonExhausted` once every configured month has run; scenario and
    /// table errors are propagated as-is.
    pub fn tick(&mut self) -> Result<MonthResult, SimulationError> {
        if self.clock.is_complete() {
            return Err(SimulationError::HorizonExhausted {
                horizon: self.clock.horizon(),
            });
        }
        let month = self.clock.current_month();

        // STEP 0: SCENARIO EVENTS
        let mut ctx = ScenarioContext {
            state: &mut self.state,
            hiring: &mut self.hiring,
            cascade: &mut self.cascade,
            attrition: &mut self.attrition,
        };
        self.scenarios.execute_month_events(&mut ctx, month)?;

        // STEP 1: ATTRITION
        let resignations = self
            .attrition
            .sample_resignations(self.state.employees(), &mut self.rng);

        let mut spillover_pool = 0.0;
        for resignation in &resignations {
            let employee = &mut self.state.employees_mut()[resignation.index];
            spillover_pool += self.cascade.spillover_contribution(employee);
            employee.resign()?;

            let vacancy = Vacancy::for_departure(employee, month);
            let overtime_hours = employee.overtime_hours();
            let branch = vacancy.branch();
            self.state.vacancies_mut().open(vacancy);

            self.state.log_event(Event::Resignation {
                month,
                employee_id: resignation.employee_id,
                branch,
                probability: resignation.probability,
                overtime_hours,
            });
            self.state.log_event(Event::VacancyOpened {
                month,
                employee_id: resignation.employee_id,
                branch,
            });
        }

        // STEP 2: HIRING
        let hires = self.state.vacancies_mut().resolve(month, &self.hiring)?;
        for hire in &hires {
            let cash_out = self
                .state
                .financial()
                .rates()
                .hire_cash_out(hire.vacancy.prior_salary(), hire.new_salary)
                .max(0.0);
            self.state.log_event(Event::Hire {
                month,
                replaced_employee_id: hire.vacancy.departed_employee_id(),
                branch: hire.vacancy.branch(),
                months_open: hire.vacancy.months_open(),
                prior_salary: hire.vacancy.prior_salary(),
                new_salary: hire.new_salary,
                cash_out,
            });
        }
        let costs = self.state.book_month(&hires);

        // STEP 3-4: OVERTIME CASCADE + CLAMP
        let cascade = self
            .cascade
            .apply(self.state.employees_mut(), spillover_pool, hires.len());
        if cascade.spillover_distributed > 0.0 {
            self.state.log_event(Event::Spillover {
                month,
                pool_hours: cascade.spillover_distributed,
                recipients: cascade.active_headcount,
            });
        }
        if cascade.relief_per_head > 0.0 {
            self.state.log_event(Event::HireRelief {
                month,
                hires: hires.len(),
                relief_per_head: cascade.relief_per_head,
            });
        }

        // STEP 5: METRICS
        let record = MonthRecord {
            month,
            hp_overtime_avg: self.state.hp_overtime_avg(),
            headcount: self.state.headcount_by_branch(),
            cumulative_cash_out: self.state.financial().reported_cash_out(),
            cumulative_opportunity_loss: self.state.financial().reported_opportunity_loss(),
            resignations: resignations.len(),
            hires: hires.len(),
            open_vacancies: self.state.vacancies().len(),
        };
        self.history.push(record.clone());

        trace!(
            month,
            resignations = record.resignations,
            hires = record.hires,
            active = cascade.active_headcount,
            hp_overtime = record.hp_overtime_avg,
            "month complete"
        );

        // STEP 6: ADVANCE TIME
        self.clock.advance();

        Ok(MonthResult {
            record,
            costs,
            cascade,
        })
    }

    /// Run every remaining month
    pub fn run_to_completion(&mut self) -> Result<(), SimulationError> {
        while !self.clock.is_complete() {
            self.tick()?;
        }
        Ok(())
    }

    /// Run every remaining month and hand back the history
    pub fn run(mut self) -> Result<TrialHistory, SimulationError> {
        self.run_to_completion()?;
        Ok(self.history)
    }

    /// Consume the engine, keeping the final state and history
    pub fn into_parts(self) -> (SimulationState, TrialHistory) {
        (self.state, self.history)
    }
}
