//! Scenario event types for simulation configuration
//!
//! Scenario events change trial parameters or compensation at scheduled
//! months, e.g. a recruiting push that shortens rural lead time from month 6,
//! or a pay raise for high performers at the start of year two.
//!
//! # Design Principles
//!
//! 1. **Determinism**: events fire on fixed months and consume no randomness
//! 2. **Start of month**: events apply before that month's attrition draw
//! 3. **Logged**: every execution is recorded in the trial's event log

use crate::models::employee::Branch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by malformed or failing scenario events
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("Invalid {event} event: {reason}")]
    InvalidParameter { event: &'static str, reason: String },

    #[error("Repeating schedule interval must be > 0")]
    ZeroInterval,
}

/// A scenario event that modifies trial parameters or state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// Set the replacement lead time for one branch
    ///
    /// Applies to vacancies already open as well as new ones.
    ///
    /// # Example
    /// A regional recruiting agency cuts rural lead time from 10 to 7 months
    LeadTimeChange { branch: Branch, lead_time: usize },

    /// Set the share of a leaver's workload that spills onto colleagues
    ///
    /// # Example
    /// Process automation lowers spillover from 0.6 to 0.4
    SpilloverRateChange { rate: f64 },

    /// Multiply internal salaries of active employees
    ///
    /// Compa-ratios are recomputed, which lowers financial attrition risk.
    /// `high_performers_only` and `branch` narrow the affected group.
    ///
    /// # Example
    /// 10% retention raise for high performers
    CompensationAdjustment {
        multiplier: f64,
        #[serde(default)]
        high_performers_only: bool,
        #[serde(default)]
        branch: Option<Branch>,
    },

    /// Set the baseline monthly resignation probability
    ///
    /// # Example
    /// Labour market tightens: base rate rises from 0.8% to 1.2%
    BaseAttritionRateChange { base_rate: f64 },
}

impl ScenarioEvent {
    /// Reject parameters the engine cannot honour
    pub fn validate(&self) -> Result<(), ScenarioError> {
        match self {
            ScenarioEvent::LeadTimeChange { lead_time, .. } if *lead_time == 0 => {
                Err(ScenarioError::InvalidParameter {
                    event: "lead_time_change",
                    reason: "lead_time must be > 0".to_string(),
                })
            }
            ScenarioEvent::SpilloverRateChange { rate } if !(*rate >= 0.0) => {
                Err(ScenarioError::InvalidParameter {
                    event: "spillover_rate_change",
                    reason: format!("rate must be >= 0, got {}", rate),
                })
            }
            ScenarioEvent::CompensationAdjustment { multiplier, .. } if !(*multiplier > 0.0) => {
                Err(ScenarioError::InvalidParameter {
                    event: "compensation_adjustment",
                    reason: format!("multiplier must be > 0, got {}", multiplier),
                })
            }
            ScenarioEvent::BaseAttritionRateChange { base_rate } if !(*base_rate >= 0.0) => {
                Err(ScenarioError::InvalidParameter {
                    event: "base_attrition_rate_change",
                    reason: format!("base_rate must be >= 0, got {}", base_rate),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            ScenarioEvent::LeadTimeChange { .. } => "lead_time_change",
            ScenarioEvent::SpilloverRateChange { .. } => "spillover_rate_change",
            ScenarioEvent::CompensationAdjustment { .. } => "compensation_adjustment",
            ScenarioEvent::BaseAttritionRateChange { .. } => "base_attrition_rate_change",
        }
    }
}

/// When to execute a scenario event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventSchedule {
    /// Execute once at a specific month
    OneTime { month: usize },

    /// Execute at regular intervals starting from start_month
    Repeating { start_month: usize, interval: usize },
}

impl EventSchedule {
    /// Check if this schedule triggers at the given month
    pub fn should_execute(&self, month: usize) -> bool {
        match self {
            EventSchedule::OneTime { month: event_month } => month == *event_month,
            EventSchedule::Repeating {
                start_month,
                interval,
            } => *interval > 0 && month >= *start_month && (month - start_month) % interval == 0,
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        match self {
            EventSchedule::Repeating { interval: 0, .. } => Err(ScenarioError::ZeroInterval),
            _ => Ok(()),
        }
    }
}

/// A scenario event paired with its schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub event: ScenarioEvent,
    pub schedule: EventSchedule,
}

impl ScheduledEvent {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.schedule.validate()?;
        self.event.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_time_schedule() {
        let schedule = EventSchedule::OneTime { month: 10 };

        assert!(!schedule.should_execute(9));
        assert!(schedule.should_execute(10));
        assert!(!schedule.should_execute(11));
    }

    #[test]
    fn test_repeating_schedule() {
        let schedule = EventSchedule::Repeating {
            start_month: 6,
            interval: 12,
        };

        assert!(!schedule.should_execute(5));
        assert!(schedule.should_execute(6));
        assert!(!schedule.should_execute(12));
        assert!(schedule.should_execute(18));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let schedule = EventSchedule::Repeating {
            start_month: 0,
            interval: 0,
        };
        assert_eq!(schedule.validate(), Err(ScenarioError::ZeroInterval));
        assert!(!schedule.should_execute(0));
    }

    #[test]
    fn test_event_deserializes_from_tagged_json() {
        let json = r#"{
            "event": {"type": "lead_time_change", "branch": "Rural", "lead_time": 7},
            "schedule": {"month": 6}
        }"#;
        let scheduled: ScheduledEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            scheduled.event,
            ScenarioEvent::LeadTimeChange {
                branch: Branch::Rural,
                lead_time: 7
            }
        );
        assert_eq!(scheduled.schedule, EventSchedule::OneTime { month: 6 });
    }
}
