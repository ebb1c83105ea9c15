//! Tests for RngManager determinism and trial seed derivation

use proptest::prelude::*;
use workforce_simulator_core_rs::rng::{derive_seed, RngManager};

#[test]
fn test_same_seed_same_sequence() {
    let mut a = RngManager::new(12345);
    let mut b = RngManager::new(12345);

    for _ in 0..1000 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = RngManager::new(1);
    let mut b = RngManager::new(2);

    let same = (0..100).filter(|_| a.next() == b.next()).count();
    assert!(same < 5);
}

#[test]
fn test_derived_seeds_are_distinct() {
    let seeds: std::collections::HashSet<u64> = (0..1000).map(|i| derive_seed(42, i)).collect();
    assert_eq!(seeds.len(), 1000);
    assert_ne!(derive_seed(42, 0), derive_seed(43, 0));
}

#[test]
fn test_weighted_index_skips_zero_weights() {
    let mut rng = RngManager::new(7);
    for _ in 0..500 {
        let idx = rng.weighted_index(&[0.0, 1.0, 0.0, 3.0]);
        assert!(idx == 1 || idx == 3);
    }
}

proptest! {
    #[test]
    fn prop_next_f64_in_unit_interval(seed in any::<u64>()) {
        let mut rng = RngManager::new(seed);
        for _ in 0..100 {
            let x = rng.next_f64();
            prop_assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn prop_range_respects_bounds(seed in any::<u64>(), min in -1000i64..1000, width in 1i64..500) {
        let mut rng = RngManager::new(seed);
        for _ in 0..50 {
            let v = rng.range(min, min + width);
            prop_assert!(v >= min && v < min + width);
        }
    }
}
