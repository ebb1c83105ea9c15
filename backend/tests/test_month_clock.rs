//! Tests for MonthClock

use workforce_simulator_core_rs::MonthClock;

#[test]
fn test_month_clock_new() {
    let clock = MonthClock::new(24);
    assert_eq!(clock.current_month(), 0);
    assert_eq!(clock.horizon(), 24);
    assert_eq!(clock.remaining(), 24);
    assert!(!clock.is_complete());
}

#[test]
fn test_advance_until_complete() {
    let mut clock = MonthClock::new(3);

    clock.advance();
    clock.advance();
    assert_eq!(clock.current_month(), 2);
    assert_eq!(clock.remaining(), 1);
    assert!(!clock.is_complete());

    clock.advance();
    assert!(clock.is_complete());
    assert_eq!(clock.remaining(), 0);
}

#[test]
fn test_year_boundary() {
    let mut clock = MonthClock::new(24);

    for _ in 0..11 {
        clock.advance();
    }
    assert_eq!(clock.current_year(), 0);
    assert_eq!(clock.month_of_year(), 11);

    // Cross into year 1
    clock.advance();
    assert_eq!(clock.current_year(), 1);
    assert_eq!(clock.month_of_year(), 0);
}

#[test]
#[should_panic(expected = "horizon must be positive")]
fn test_zero_horizon_panics() {
    MonthClock::new(0);
}
