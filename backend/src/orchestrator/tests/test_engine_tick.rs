// Tick-level behavior of the simulation engine on staged workforces

use crate::attrition::AttritionConfig;
use crate::config::SimulationConfig;
use crate::models::employee::{Branch, Employee, EmployeeProfile, PerformanceRating};
use crate::models::event::Event;
use crate::models::vacancy::Vacancy;
use crate::models::RatingTier;
use crate::orchestrator::engine::{SimulationEngine, SimulationError};
use crate::rng::RngManager;

fn staff(id: u32, branch: Branch, overtime: f64) -> Employee {
    Employee::new(
        id,
        EmployeeProfile {
            age: 30,
            tenure_years: 8,
            job_level: 2,
            rating: PerformanceRating::APlus,
            branch,
            salary: 6_000_000.0,
            market_salary: 5_000_000.0,
            is_high_performer: true,
            absorption_factor: 1.0,
            overtime_hours: overtime,
        },
    )
}

/// Attrition switched off entirely
fn quiet_config(months: usize) -> SimulationConfig {
    SimulationConfig {
        num_employees: 4,
        num_months: months,
        record_events: true,
        attrition: AttritionConfig {
            base_rate: 0.0,
            financial_weight: 0.0,
            workload_weight: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_quiet_month_changes_nothing_but_the_clock() {
    let population = vec![staff(0, Branch::Urban, 40.0), staff(1, Branch::Rural, 40.0)];
    let mut engine =
        SimulationEngine::new(&quiet_config(3), population, RngManager::new(1)).unwrap();

    let result = engine.tick().unwrap();

    assert_eq!(result.record.month, 0);
    assert_eq!(result.record.resignations, 0);
    assert_eq!(result.record.hires, 0);
    assert_eq!(result.record.total_headcount(), 2);
    assert_eq!(result.record.hp_overtime_avg, 40.0);
    assert_eq!(result.record.cumulative_cash_out, 0.0);
    assert_eq!(engine.current_month(), 1);
}

#[test]
fn test_certain_attrition_empties_workforce_without_stopping() {
    let mut config = quiet_config(4);
    config.attrition.base_rate = 1.0;
    let population = vec![staff(0, Branch::Urban, 30.0), staff(1, Branch::Urban, 30.0)];
    let mut engine = SimulationEngine::new(&config, population, RngManager::new(9)).unwrap();

    let first = engine.tick().unwrap();
    assert_eq!(first.record.resignations, 2);
    assert_eq!(first.record.total_headcount(), 0);
    assert_eq!(first.record.open_vacancies, 2);
    // Nobody left to absorb spillover
    assert_eq!(first.cascade.spillover_distributed, 0.0);
    assert_eq!(first.record.hp_overtime_avg, 0.0);
    assert!(!engine.state().get_employee(1).unwrap().is_active());

    engine.run_to_completion().unwrap();
    assert_eq!(engine.history().len(), 4);
    assert!(engine.is_complete());
}

#[test]
fn test_resignation_opens_vacancy() {
    let mut config = quiet_config(1);
    config.attrition.base_rate = 1.0;
    let population = vec![staff(0, Branch::Urban, 50.0)];
    let mut engine = SimulationEngine::new(&config, population, RngManager::new(3)).unwrap();
    engine.tick().unwrap();

    let log = engine.state().event_log();
    assert_eq!(log.events_of_type("Resignation").len(), 1);
    assert_eq!(log.events_of_type("VacancyOpened").len(), 1);
    assert_eq!(engine.state().vacancies().len(), 1);
}

#[test]
fn test_opportunity_loss_accrues_from_month_of_departure() {
    let mut config = quiet_config(1);
    config.attrition.base_rate = 1.0;
    let population = vec![staff(0, Branch::Rural, 20.0)];
    let mut engine = SimulationEngine::new(&config, population, RngManager::new(5)).unwrap();

    let result = engine.tick().unwrap();

    // 6,000,000 / 0.5 / 12 = 1,000,000 for the one open vacancy
    assert!((result.costs.opportunity_loss - 1_000_000.0).abs() < 1e-6);
    assert!((result.record.cumulative_opportunity_loss - 1.0).abs() < 1e-12);
    assert_eq!(result.costs.cash_out, 0.0);
}

#[test]
fn test_urban_vacancy_hires_at_fifth_month_index_four() {
    let population = vec![staff(0, Branch::Urban, 60.0), staff(1, Branch::Urban, 60.0)];
    let mut engine =
        SimulationEngine::new(&quiet_config(6), population, RngManager::new(2)).unwrap();
    engine.state_mut().vacancies_mut().carry_over(Vacancy::new(
        99,
        Branch::Urban,
        0,
        5_000_000.0,
        RatingTier::B,
    ));

    for month in 0..4 {
        let result = engine.tick().unwrap();
        assert_eq!(result.record.hires, 0, "no hire expected at month {month}");
    }

    let result = engine.tick().unwrap();
    assert_eq!(result.record.month, 4);
    assert_eq!(result.record.hires, 1);
    assert_eq!(result.record.open_vacancies, 0);

    // 5.75M * 0.35 + 0.75M = 2.7625M
    assert!((result.costs.cash_out - 2_762_500.0).abs() < 1e-6);

    // 120h relief over two active employees
    assert_eq!(result.cascade.relief_per_head, 60.0);
    for employee in engine.state().employees() {
        assert_eq!(employee.overtime_hours(), 20.0, "relief floors at 20h");
    }

    let hires = engine.state().event_log().events_of_type("Hire");
    assert_eq!(hires.len(), 1);
    match hires[0] {
        Event::Hire {
            months_open,
            replaced_employee_id,
            ..
        } => {
            assert_eq!(*months_open, 5);
            assert_eq!(*replaced_employee_id, 99);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_tick_past_horizon_is_reported() {
    let population = vec![staff(0, Branch::Urban, 20.0)];
    let mut engine =
        SimulationEngine::new(&quiet_config(2), population, RngManager::new(4)).unwrap();
    engine.run_to_completion().unwrap();

    assert_eq!(
        engine.tick().unwrap_err(),
        SimulationError::HorizonExhausted { horizon: 2 }
    );
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let mut config = quiet_config(2);
    config.hiring.lead_times.urban = 0;
    let result = SimulationEngine::new(&config, Vec::new(), RngManager::new(1));
    assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
}

#[test]
fn test_event_recording_can_be_disabled() {
    let mut config = quiet_config(2);
    config.record_events = false;
    config.attrition.base_rate = 1.0;
    let population = vec![staff(0, Branch::Urban, 20.0)];
    let mut engine = SimulationEngine::new(&config, population, RngManager::new(8)).unwrap();
    engine.run_to_completion().unwrap();

    assert!(engine.state().event_log().is_empty());
    assert_eq!(engine.history().records()[0].resignations, 1);
}
