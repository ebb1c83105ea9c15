//! Scheduled scenario events

pub mod handler;
pub mod types;

pub use handler::{ScenarioContext, ScenarioEventHandler};
pub use types::{EventSchedule, ScenarioError, ScenarioEvent, ScheduledEvent};
