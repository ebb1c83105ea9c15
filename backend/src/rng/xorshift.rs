//! xorshift64* random number generator
//!
//! # Determinism
//!
//! Same seed → same sequence. The Monte Carlo runner derives one seed per
//! trial from the master seed *before* dispatching trials, so sequential and
//! parallel execution produce identical histories.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use workforce_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let age = rng.range(22, 60); // [22, 60)
/// let draw = rng.next_f64();
/// assert!((22..60).contains(&age));
/// assert!((0.0..1.0).contains(&draw));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is mapped to 1 because xorshift would otherwise stay at zero.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Used for Bernoulli resignation draws and weighted category sampling.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample an index with probability proportional to `weights[i]`
    ///
    /// Weights need not sum to one. Falls back to the last index when
    /// floating-point accumulation leaves the draw just above the total.
    ///
    /// # Panics
    /// Panics if `weights` is empty.
    ///
    /// # Example
    /// ```
    /// use workforce_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let idx = rng.weighted_index(&[0.2, 0.6, 0.2]);
    /// assert!(idx < 3);
    /// ```
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must not be empty");

        let total: f64 = weights.iter().sum();
        let target = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (idx, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return idx;
            }
        }
        weights.len() - 1
    }

    /// Get current RNG state
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

/// Derive an independent seed for stream `index` from a master seed
///
/// splitmix64 finalizer over `master + index * golden_gamma`; neighbouring
/// indices land far apart in xorshift state space.
pub fn derive_seed(master: u64, index: u64) -> u64 {
    let mut z = master.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(60, 22);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_weighted_index_never_picks_zero_weight() {
        let mut rng = RngManager::new(99);
        for _ in 0..1000 {
            assert_ne!(rng.weighted_index(&[0.5, 0.0, 0.5]), 1);
        }
    }

    #[test]
    fn test_weighted_index_follows_weights() {
        let mut rng = RngManager::new(2024);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[rng.weighted_index(&[0.2, 0.6, 0.2])] += 1;
        }
        assert!(counts[1] > 5_500 && counts[1] < 6_500, "counts: {:?}", counts);
    }

    #[test]
    fn test_derive_seed_distinct_per_index() {
        let seeds: std::collections::HashSet<u64> = (0..100).map(|i| derive_seed(42, i)).collect();
        assert_eq!(seeds.len(), 100);
        assert_eq!(derive_seed(42, 3), derive_seed(42, 3));
    }
}
