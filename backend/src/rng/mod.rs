//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, reproducible draws. Every stochastic choice in
//! population synthesis and in each trial MUST go through an explicit
//! [`RngManager`] handed in by the caller; there is no global random state.

mod xorshift;

pub use xorshift::{derive_seed, RngManager};
