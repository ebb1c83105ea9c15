//! Python bindings
//!
//! - `runner`: the `MonteCarlo` class
//! - `types`: dict conversions at the boundary

pub mod runner;
pub mod types;
