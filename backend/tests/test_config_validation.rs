//! Configuration loading and fail-fast validation

use workforce_simulator_core_rs::config::compute_config_hash;
use workforce_simulator_core_rs::{
    Branch, ConfigError, PerBranch, PerformanceRating, ProbabilityPolicy, RatingTier,
    SimulationConfig,
};

#[test]
fn test_reference_defaults() {
    let config = SimulationConfig::default();

    assert_eq!(config.num_employees, 1000);
    assert_eq!(config.num_months, 24);
    assert_eq!(config.num_trials, 50);
    assert_eq!(config.hiring.lead_times, PerBranch::new(5, 10));
    assert_eq!(config.overtime.spillover_rate, 0.6);
    assert_eq!(config.overtime.floor_hours, 20.0);
    assert_eq!(config.overtime.ceiling_hours, 120.0);
    assert_eq!(config.financial.hiring_cost_rate, 0.35);
    assert_eq!(config.financial.labor_share, 0.5);
    assert_eq!(config.attrition.probability_policy, ProbabilityPolicy::Clamp);
    assert_eq!(config.hiring.replacement_premiums.premium(RatingTier::S), Ok(1.30));
    assert_eq!(config.hiring.replacement_premiums.premium(RatingTier::D), Ok(1.05));
    assert!(config.rating_table.params(PerformanceRating::AMinus).unwrap().high_performer);
    assert!(!config.rating_table.params(PerformanceRating::BPlus).unwrap().high_performer);
}

#[test]
fn test_partial_json_overrides_defaults() {
    let config = SimulationConfig::from_json_str(
        r#"{
            "num_trials": 10,
            "rng_seed": null,
            "overtime": { "spillover_rate": 0.4 },
            "attrition": { "probability_policy": "unbounded" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.num_trials, 10);
    assert_eq!(config.rng_seed, None);
    assert_eq!(config.overtime.spillover_rate, 0.4);
    assert_eq!(config.overtime.ceiling_hours, 120.0);
    assert_eq!(config.attrition.probability_policy, ProbabilityPolicy::Unbounded);
}

#[test]
fn test_zero_sizes_rejected() {
    let mut config = SimulationConfig::default();
    config.num_employees = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonPositive {
            field: "num_employees"
        })
    );

    let mut config = SimulationConfig::default();
    config.num_months = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonPositive {
            field: "num_months"
        })
    );

    let mut config = SimulationConfig::default();
    config.num_trials = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonPositive {
            field: "num_trials"
        })
    );
}

#[test]
fn test_zero_lead_time_rejected() {
    let mut config = SimulationConfig::default();
    config.hiring.lead_times.rural = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidLeadTime {
            branch: Branch::Rural
        })
    );
}

#[test]
fn test_all_zero_rating_weights_rejected() {
    let json = serde_json::json!({
        "rating_table": PerformanceRating::ALL
            .iter()
            .map(|r| (r.label().to_string(), serde_json::json!({
                "weight": 0.0,
                "absorption": 1.0,
                "performance_multiplier": 1.0,
                "high_performer": false
            })))
            .collect::<serde_json::Map<_, _>>()
    });
    assert_eq!(
        SimulationConfig::from_json_str(&json.to_string()).unwrap_err(),
        ConfigError::InvalidWeights {
            field: "rating_table.weight"
        }
    );
}

#[test]
fn test_missing_premium_tier_rejected() {
    let json = r#"{ "hiring": { "replacement_premiums": { "S": 1.3, "A": 1.25 } } }"#;
    assert!(matches!(
        SimulationConfig::from_json_str(json),
        Err(ConfigError::Missing {
            table: "replacement_premiums",
            ..
        })
    ));
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        SimulationConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_invalid_scenario_event_surfaces_as_config_error() {
    let json = r#"{ "scenario_events": [
        { "event": {"type": "spillover_rate_change", "rate": -1.0},
          "schedule": {"month": 3} }
    ] }"#;
    assert!(matches!(
        SimulationConfig::from_json_str(json),
        Err(ConfigError::Scenario(_))
    ));
}

#[test]
fn test_config_hash_is_hex_sha256() {
    let hash = compute_config_hash(&SimulationConfig::default()).unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}
