//! Event logging for trial replay and auditing.
//!
//! Every significant state change in a trial is captured as an [`Event`]:
//! - **Resignation**: employee left (with the probability that was drawn against)
//! - **VacancyOpened**: position opened by that departure
//! - **Hire**: replacement completed, with pricing
//! - **Spillover**: departed workload shared out
//! - **HireRelief**: overtime relieved by hires
//! - **ScenarioEventExecuted**: scheduled scenario adjustment applied
//!
//! # Example
//!
//! ```rust
//! use workforce_simulator_core_rs::models::{Event, EventLog};
//! use workforce_simulator_core_rs::Branch;
//!
//! let mut log = EventLog::new();
//! log.log(Event::VacancyOpened {
//!     month: 3,
//!     employee_id: 42,
//!     branch: Branch::Rural,
//! });
//!
//! assert_eq!(log.events_in_month(3).len(), 1);
//! assert_eq!(log.events_for_employee(42).len(), 1);
//! ```

use crate::models::employee::Branch;

/// Trial event capturing a state change.
///
/// Events are logged in the order they occur within a month.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Resignation {
        month: usize,
        employee_id: u32,
        branch: Branch,
        probability: f64,
        overtime_hours: f64,
    },

    VacancyOpened {
        month: usize,
        employee_id: u32,
        branch: Branch,
    },

    Hire {
        month: usize,
        /// Employee whose departure opened the filled vacancy
        replaced_employee_id: u32,
        branch: Branch,
        months_open: usize,
        prior_salary: f64,
        new_salary: f64,
        cash_out: f64,
    },

    Spillover {
        month: usize,
        pool_hours: f64,
        recipients: usize,
    },

    HireRelief {
        month: usize,
        hires: usize,
        relief_per_head: f64,
    },

    ScenarioEventExecuted {
        month: usize,
        event_type: String,
        details: serde_json::Value,
    },
}

impl Event {
    /// Month (tick index) in which the event occurred
    pub fn month(&self) -> usize {
        match self {
            Event::Resignation { month, .. } => *month,
            Event::VacancyOpened { month, .. } => *month,
            Event::Hire { month, .. } => *month,
            Event::Spillover { month, .. } => *month,
            Event::HireRelief { month, .. } => *month,
            Event::ScenarioEventExecuted { month, .. } => *month,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Resignation { .. } => "Resignation",
            Event::VacancyOpened { .. } => "VacancyOpened",
            Event::Hire { .. } => "Hire",
            Event::Spillover { .. } => "Spillover",
            Event::HireRelief { .. } => "HireRelief",
            Event::ScenarioEventExecuted { .. } => "ScenarioEventExecuted",
        }
    }

    /// Employee the event concerns, if any
    pub fn employee_id(&self) -> Option<u32> {
        match self {
            Event::Resignation { employee_id, .. } => Some(*employee_id),
            Event::VacancyOpened { employee_id, .. } => Some(*employee_id),
            Event::Hire {
                replaced_employee_id,
                ..
            } => Some(*replaced_employee_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying trial events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_in_month(&self, month: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.month() == month).collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn events_for_employee(&self, employee_id: u32) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.employee_id() == Some(employee_id))
            .collect()
    }
}
