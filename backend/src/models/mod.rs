//! Domain models for the workforce simulator

pub mod employee;
pub mod event;
pub mod history;
pub mod state;
pub mod vacancy;

// Re-exports
pub use employee::{
    Branch, Employee, EmployeeError, EmployeeProfile, EmployeeStatus, PerBranch,
    PerformanceRating, RatingTier,
};
pub use event::{Event, EventLog};
pub use history::{MonthRecord, TrialHistory};
pub use state::SimulationState;
pub use vacancy::Vacancy;
