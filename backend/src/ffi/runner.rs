//! PyO3 wrapper for the Monte Carlo runner

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    aggregate_to_py, parse_simulation_config, simulation_error_to_py, trial_history_to_py,
};
use crate::orchestrator::MonteCarloRunner;

/// Python wrapper for [`MonteCarloRunner`]
///
/// # Example (from Python)
///
/// ```python
/// from workforce_simulator_core_rs import MonteCarlo
///
/// mc = MonteCarlo({"num_employees": 1000, "num_trials": 50, "rng_seed": 42})
/// result = mc.run()
/// print(result["cash_out"][-1], result["retention_pct"]["rural"])
///
/// months = mc.run_trial(7)
/// print(months[0]["resignations"])
/// ```
#[pyclass(name = "MonteCarlo")]
pub struct PyMonteCarlo {
    inner: MonteCarloRunner,
}

#[pymethods]
impl PyMonteCarlo {
    /// Create a runner; dict keys override the default configuration
    ///
    /// Raises ValueError on an invalid configuration.
    #[new]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let config = parse_simulation_config(config)?;
        let inner = MonteCarloRunner::new(config).map_err(simulation_error_to_py)?;
        Ok(Self { inner })
    }

    /// Master seed actually used (drawn from entropy when not configured)
    #[getter]
    fn master_seed(&self) -> u64 {
        self.inner.master_seed()
    }

    #[getter]
    fn config_hash(&self) -> &str {
        self.inner.config_hash()
    }

    /// Run every trial and return the median series as a dict
    ///
    /// The GIL is released while trials execute.
    fn run(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = py
            .allow_threads(|| self.inner.run())
            .map_err(simulation_error_to_py)?;
        aggregate_to_py(py, &result)
    }

    /// Run a single trial with `seed` and return its month records
    fn run_trial(&self, py: Python<'_>, seed: u64) -> PyResult<Py<PyList>> {
        let history = py
            .allow_threads(|| {
                let population = self.inner.generate_population()?;
                self.inner.run_seeded_trial(&population, seed)
            })
            .map_err(simulation_error_to_py)?;
        trial_history_to_py(py, &history)
    }
}
