//! Simulation State
//!
//! Everything one trial mutates: the workforce, the open vacancies, the
//! running financial totals and the event log. A state is owned by exactly
//! one trial; trials start from their own deep copy of the initial
//! population and never share a state.
//!
//! # Critical Invariants
//!
//! 1. **One-way status**: employees only move Active → Resigned
//! 2. **One vacancy per departure**: every resignation opens exactly one vacancy
//! 3. **Monotone ledgers**: cumulative cash-out and opportunity loss never decrease

use crate::costs::{CostBreakdown, FinancialLedger, FinancialRates};
use crate::models::employee::{Employee, PerBranch};
use crate::models::event::{Event, EventLog};
use crate::population::headcount_by_branch;
use crate::vacancy::{Hire, VacancyLedger};

/// Complete state of one trial
///
/// # Example
///
/// ```rust
/// use workforce_simulator_core_rs::{FinancialRates, SimulationState};
///
/// let state = SimulationState::new(Vec::new(), FinancialRates::default());
/// assert_eq!(state.active_count(), 0);
/// assert!(state.vacancies().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    employees: Vec<Employee>,
    vacancies: VacancyLedger,
    financial: FinancialLedger,
    event_log: EventLog,
    record_events: bool,
}

impl SimulationState {
    pub fn new(employees: Vec<Employee>, rates: FinancialRates) -> Self {
        Self {
            employees,
            vacancies: VacancyLedger::new(),
            financial: FinancialLedger::new(rates),
            event_log: EventLog::new(),
            record_events: true,
        }
    }

    /// Turn event recording on or off (metrics are unaffected)
    pub fn with_event_recording(mut self, enabled: bool) -> Self {
        self.record_events = enabled;
        self
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employees_mut(&mut self) -> &mut [Employee] {
        &mut self.employees
    }

    pub fn get_employee(&self, id: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    pub fn vacancies(&self) -> &VacancyLedger {
        &self.vacancies
    }

    pub fn vacancies_mut(&mut self) -> &mut VacancyLedger {
        &mut self.vacancies
    }

    pub fn financial(&self) -> &FinancialLedger {
        &self.financial
    }

    /// Book this month's hires and one month of loss on every open vacancy
    pub fn book_month(&mut self, hires: &[Hire]) -> CostBreakdown {
        self.financial.record_month(hires, self.vacancies.iter())
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn log_event(&mut self, event: Event) {
        if self.record_events {
            self.event_log.log(event);
        }
    }

    pub fn active_count(&self) -> usize {
        self.employees.iter().filter(|e| e.is_active()).count()
    }

    pub fn headcount_by_branch(&self) -> PerBranch<usize> {
        headcount_by_branch(&self.employees)
    }

    /// Mean overtime of active high performers, 0 when none remain
    pub fn hp_overtime_avg(&self) -> f64 {
        let (sum, count) = self
            .employees
            .iter()
            .filter(|e| e.is_active() && e.is_high_performer())
            .fold((0.0, 0usize), |(sum, count), e| {
                (sum + e.overtime_hours(), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
