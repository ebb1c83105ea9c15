//! Type conversion utilities for FFI boundary
//!
//! Python configuration dicts are routed through the same serde path as JSON
//! config files, so every key `SimulationConfig` accepts is accepted here and
//! absent keys keep their defaults.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::config::SimulationConfig;
use crate::models::history::{MonthRecord, TrialHistory};
use crate::orchestrator::{AggregateResult, SimulationError};

/// Map engine errors onto Python exceptions
///
/// Configuration problems surface as `ValueError`, anything else as
/// `RuntimeError`.
pub fn simulation_error_to_py(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfig(_) | SimulationError::Scenario(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Parse a Python config dict into a validated `SimulationConfig`
///
/// # Errors
///
/// Raises ValueError if the dict is not JSON-serializable, a value has the
/// wrong type, or validation fails.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let py = py_config.py();
    let json: String = PyModule::import(py, "json")?
        .call_method1("dumps", (py_config,))?
        .extract()?;

    SimulationConfig::from_json_str(&json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Convert one month of a trial to a Python dict
pub fn month_record_to_py<'py>(
    py: Python<'py>,
    record: &MonthRecord,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("month", record.month)?;
    dict.set_item("hp_overtime_avg", record.hp_overtime_avg)?;
    dict.set_item("urban_headcount", record.headcount.urban)?;
    dict.set_item("rural_headcount", record.headcount.rural)?;
    dict.set_item("cumulative_cash_out", record.cumulative_cash_out)?;
    dict.set_item(
        "cumulative_opportunity_loss",
        record.cumulative_opportunity_loss,
    )?;
    dict.set_item("resignations", record.resignations)?;
    dict.set_item("hires", record.hires)?;
    dict.set_item("open_vacancies", record.open_vacancies)?;
    Ok(dict)
}

/// Convert a trial history to a list of month dicts
pub fn trial_history_to_py(py: Python<'_>, history: &TrialHistory) -> PyResult<Py<PyList>> {
    let list = PyList::empty(py);
    for record in history.records() {
        list.append(month_record_to_py(py, record)?)?;
    }
    Ok(list.unbind())
}

/// Convert an aggregate to a dict of median series
pub fn aggregate_to_py(py: Python<'_>, result: &AggregateResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("run_id", result.run_id.to_string())?;
    dict.set_item("config_hash", &result.config_hash)?;
    dict.set_item("master_seed", result.master_seed)?;
    dict.set_item("num_trials", result.num_trials)?;
    dict.set_item("months", &result.months)?;

    dict.set_item("cash_out", &result.cash_out)?;
    dict.set_item("opportunity_loss", &result.opportunity_loss)?;
    dict.set_item("hp_overtime", &result.hp_overtime)?;
    dict.set_item("urban_headcount", &result.headcount.urban)?;
    dict.set_item("rural_headcount", &result.headcount.rural)?;
    dict.set_item("resignations", &result.resignations)?;
    dict.set_item("hires", &result.hires)?;
    dict.set_item("open_vacancies", &result.open_vacancies)?;

    let retention = PyDict::new(py);
    retention.set_item("urban", result.retention_pct.urban)?;
    retention.set_item("rural", result.retention_pct.rural)?;
    dict.set_item("retention_pct", retention)?;

    let summary = PyDict::new(py);
    summary.set_item("cash_out", result.final_summary.cash_out)?;
    summary.set_item("opportunity_loss", result.final_summary.opportunity_loss)?;
    summary.set_item("total", result.final_summary.total)?;
    dict.set_item("final_summary", summary)?;

    Ok(dict.unbind())
}
