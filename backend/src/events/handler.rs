//! Scenario event execution and scheduling
//!
//! This module handles:
//! - Selecting the events scheduled for a month
//! - Applying them to the trial's parameters and state
//! - Logging each execution

use crate::attrition::AttritionModel;
use crate::events::types::{ScenarioError, ScenarioEvent, ScheduledEvent};
use crate::models::{state::SimulationState, Event};
use crate::overtime::OvertimeCascade;
use crate::vacancy::HiringConfig;
use serde_json::json;

/// Everything a scenario event may modify
pub struct ScenarioContext<'a> {
    pub state: &'a mut SimulationState,
    pub hiring: &'a mut HiringConfig,
    pub cascade: &'a mut OvertimeCascade,
    pub attrition: &'a mut AttritionModel,
}

/// Handles scenario event scheduling and execution
#[derive(Debug, Clone, Default)]
pub struct ScenarioEventHandler {
    events: Vec<ScheduledEvent>,
}

impl ScenarioEventHandler {
    pub fn new(events: Vec<ScheduledEvent>) -> Self {
        Self { events }
    }

    /// Get all events scheduled for a specific month
    pub fn get_events_for_month(&self, month: usize) -> Vec<&ScenarioEvent> {
        self.events
            .iter()
            .filter(|scheduled| scheduled.schedule.should_execute(month))
            .map(|scheduled| &scheduled.event)
            .collect()
    }

    /// Execute all events scheduled for the given month, in configured order
    ///
    /// Returns the number of events executed.
    pub fn execute_month_events(
        &self,
        ctx: &mut ScenarioContext<'_>,
        month: usize,
    ) -> Result<usize, ScenarioError> {
        let events = self.get_events_for_month(month);
        let count = events.len();

        for event in events {
            event.execute(ctx, month)?;
        }

        Ok(count)
    }
}

impl ScenarioEvent {
    /// Apply this event
    pub fn execute(&self, ctx: &mut ScenarioContext<'_>, month: usize) -> Result<(), ScenarioError> {
        self.validate()?;

        let details = match self {
            ScenarioEvent::LeadTimeChange { branch, lead_time } => {
                let old = std::mem::replace(ctx.hiring.lead_times.get_mut(*branch), *lead_time);
                json!({
                    "branch": branch.label(),
                    "old_lead_time": old,
                    "new_lead_time": lead_time,
                })
            }

            ScenarioEvent::SpilloverRateChange { rate } => {
                let old = ctx.cascade.config().spillover_rate;
                ctx.cascade.set_spillover_rate(*rate);
                json!({ "old_rate": old, "new_rate": rate })
            }

            ScenarioEvent::CompensationAdjustment {
                multiplier,
                high_performers_only,
                branch,
            } => {
                let mut affected = 0usize;
                for employee in ctx.state.employees_mut().iter_mut().filter(|e| {
                    e.is_active()
                        && (!high_performers_only || e.is_high_performer())
                        && branch.map_or(true, |b| e.branch() == b)
                }) {
                    employee.adjust_salary(*multiplier);
                    affected += 1;
                }
                json!({
                    "multiplier": multiplier,
                    "high_performers_only": high_performers_only,
                    "branch": branch.map(|b| b.label()),
                    "affected": affected,
                })
            }

            ScenarioEvent::BaseAttritionRateChange { base_rate } => {
                let old = ctx.attrition.config().base_rate;
                ctx.attrition.set_base_rate(*base_rate);
                json!({ "old_base_rate": old, "new_base_rate": base_rate })
            }
        };

        ctx.state.log_event(Event::ScenarioEventExecuted {
            month,
            event_type: self.event_type().to_string(),
            details,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::EventSchedule;
    use crate::models::employee::Branch;

    #[test]
    fn test_event_handler_get_events_for_month() {
        let events = vec![ScheduledEvent {
            event: ScenarioEvent::SpilloverRateChange { rate: 0.4 },
            schedule: EventSchedule::OneTime { month: 10 },
        }];

        let handler = ScenarioEventHandler::new(events);

        assert_eq!(handler.get_events_for_month(10).len(), 1);
        assert_eq!(handler.get_events_for_month(11).len(), 0);
    }

    #[test]
    fn test_invalid_lead_time_rejected_on_execute() {
        let event = ScenarioEvent::LeadTimeChange {
            branch: Branch::Urban,
            lead_time: 0,
        };
        assert!(matches!(
            event.validate(),
            Err(ScenarioError::InvalidParameter { .. })
        ));
    }
}
