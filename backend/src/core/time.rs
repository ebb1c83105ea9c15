//! Time management for the simulation
//!
//! A trial advances in discrete monthly ticks over a fixed horizon. There is
//! no early exit: the clock only reports completion once every month of the
//! horizon has been executed.

use serde::{Deserialize, Serialize};

/// Manages simulation time in monthly ticks over a fixed horizon
///
/// # Example
/// ```
/// use workforce_simulator_core_rs::MonthClock;
///
/// let mut clock = MonthClock::new(24);
/// assert_eq!(clock.current_month(), 0);
/// assert!(!clock.is_complete());
///
/// clock.advance();
/// assert_eq!(clock.current_month(), 1);
/// assert_eq!(clock.remaining(), 23);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthClock {
    /// Months executed so far (index of the next month to run)
    current_month: usize,
    /// Total number of months in the trial
    horizon: usize,
}

impl MonthClock {
    /// Create a new clock for a horizon of `horizon` months
    ///
    /// # Panics
    /// Panics if `horizon` is zero. Configuration validation rejects a zero
    /// horizon before a clock is ever built.
    pub fn new(horizon: usize) -> Self {
        assert!(horizon > 0, "horizon must be positive");
        Self {
            current_month: 0,
            horizon,
        }
    }

    /// Advance by one month
    pub fn advance(&mut self) {
        self.current_month += 1;
    }

    /// Index of the month about to run (0-based)
    pub fn current_month(&self) -> usize {
        self.current_month
    }

    /// Configured number of months
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Months still to run
    pub fn remaining(&self) -> usize {
        self.horizon.saturating_sub(self.current_month)
    }

    /// True once every month of the horizon has been executed
    pub fn is_complete(&self) -> bool {
        self.current_month >= self.horizon
    }

    /// Simulation year of the current month (0-indexed)
    ///
    /// ```
    /// use workforce_simulator_core_rs::MonthClock;
    ///
    /// let mut clock = MonthClock::new(24);
    /// for _ in 0..12 {
    ///     clock.advance();
    /// }
    /// assert_eq!(clock.current_year(), 1);
    /// assert_eq!(clock.month_of_year(), 0);
    /// ```
    pub fn current_year(&self) -> usize {
        self.current_month / 12
    }

    /// Month within the current simulation year (0-11)
    pub fn month_of_year(&self) -> usize {
        self.current_month % 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "horizon must be positive")]
    fn test_zero_horizon_panics() {
        MonthClock::new(0);
    }
}
