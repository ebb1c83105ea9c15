//! Tests for vacancy aging and hire resolution

use proptest::prelude::*;
use workforce_simulator_core_rs::{
    Branch, HiringConfig, PerBranch, RatingTier, Vacancy, VacancyLedger,
};

fn vacancy(id: u32, branch: Branch, month: usize, salary: f64, tier: RatingTier) -> Vacancy {
    Vacancy::new(id, branch, month, salary, tier)
}

/// Run months `from..` until the ledger produces a hire; returns the hire month
fn month_of_first_hire(ledger: &mut VacancyLedger, hiring: &HiringConfig, from: usize) -> usize {
    for month in from..from + 100 {
        if !ledger.resolve(month, hiring).unwrap().is_empty() {
            return month;
        }
    }
    panic!("vacancy never resolved");
}

#[test]
fn test_urban_vacancy_fills_after_five_months() {
    let hiring = HiringConfig::default();
    let mut ledger = VacancyLedger::new();
    ledger.open(vacancy(1, Branch::Urban, 3, 5_000_000.0, RatingTier::A));

    assert_eq!(month_of_first_hire(&mut ledger, &hiring, 3), 8);
    assert!(ledger.is_empty());
}

#[test]
fn test_rural_vacancy_fills_after_ten_months() {
    let hiring = HiringConfig::default();
    let mut ledger = VacancyLedger::new();
    ledger.open(vacancy(1, Branch::Rural, 0, 5_000_000.0, RatingTier::A));

    assert_eq!(month_of_first_hire(&mut ledger, &hiring, 0), 10);
}

#[test]
fn test_carried_over_vacancy_hires_at_month_index_four() {
    let hiring = HiringConfig::default();
    let mut ledger = VacancyLedger::new();
    ledger.carry_over(vacancy(1, Branch::Urban, 0, 5_000_000.0, RatingTier::B));

    assert_eq!(month_of_first_hire(&mut ledger, &hiring, 0), 4);
}

#[test]
fn test_hire_salary_uses_departed_tier_premium() {
    let hiring = HiringConfig::default();
    let mut ledger = VacancyLedger::new();
    ledger.carry_over(vacancy(1, Branch::Urban, 0, 1_000_000.0, RatingTier::S));
    ledger.carry_over(vacancy(2, Branch::Urban, 0, 1_000_000.0, RatingTier::D));

    let mut hires = Vec::new();
    for month in 0..5 {
        hires.extend(ledger.resolve(month, &hiring).unwrap());
    }

    assert_eq!(hires.len(), 2);
    assert_eq!(hires[0].month, 4);
    assert!((hires[0].new_salary - 1_300_000.0).abs() < 1e-6);
    assert!((hires[1].new_salary - 1_050_000.0).abs() < 1e-6);
    assert!((hires[0].wage_markup() - 300_000.0).abs() < 1e-6);
    assert_eq!(hires[0].vacancy.months_open(), 5);
    assert_eq!(hires[0].vacancy.opened_month(), 0);
    assert_eq!(hires[1].vacancy.departed_employee_id(), 2);
}

#[test]
fn test_lead_time_change_applies_to_open_vacancies() {
    let mut hiring = HiringConfig::default();
    let mut ledger = VacancyLedger::new();
    ledger.open(vacancy(1, Branch::Rural, 0, 1_000.0, RatingTier::C));

    for month in 0..3 {
        assert!(ledger.resolve(month, &hiring).unwrap().is_empty());
    }
    // Counter is at 2; shortening to 3 fills it next month
    hiring.lead_times.rural = 3;
    let hires = ledger.resolve(3, &hiring).unwrap();
    assert_eq!(hires.len(), 1);
}

#[test]
fn test_count_by_branch_includes_pending() {
    let mut ledger = VacancyLedger::new();
    ledger.carry_over(vacancy(1, Branch::Urban, 0, 1.0, RatingTier::B));
    ledger.open(vacancy(2, Branch::Rural, 0, 1.0, RatingTier::B));
    ledger.open(vacancy(3, Branch::Rural, 0, 1.0, RatingTier::B));

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.count_by_branch(), PerBranch::new(1, 2));
}

proptest! {
    #[test]
    fn prop_opened_at_t_resolves_at_t_plus_lead(
        opened in 0usize..30,
        urban in 1usize..12,
        rural in 1usize..24,
        rural_branch in any::<bool>(),
    ) {
        let hiring = HiringConfig {
            lead_times: PerBranch::new(urban, rural),
            ..Default::default()
        };
        let branch = if rural_branch { Branch::Rural } else { Branch::Urban };
        let mut ledger = VacancyLedger::new();
        ledger.open(vacancy(1, branch, opened, 1_000.0, RatingTier::B));

        let hire_month = month_of_first_hire(&mut ledger, &hiring, opened);
        prop_assert_eq!(hire_month, opened + *hiring.lead_times.get(branch));
    }
}
