//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and Python dicts.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::orchestrator::{SimulationSnapshot, SimulatorConfig, TickResult};

/// Extract an optional field from a Python dict.
///
/// Errors only if the field is present with the wrong type.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Build a `SimulatorConfig` from `{"capacity": int, "record_events": bool}`
///
/// Missing keys fall back to `SimulatorConfig::default()`.
pub fn parse_simulator_config(dict: &Bound<'_, PyDict>) -> PyResult<SimulatorConfig> {
    let defaults = SimulatorConfig::default();

    Ok(SimulatorConfig {
        capacity: extract_optional(dict, "capacity")?.unwrap_or(defaults.capacity),
        record_events: extract_optional(dict, "record_events")?
            .unwrap_or(defaults.record_events),
    })
}

/// Convert TickResult to Python dict
pub fn tick_result_to_py<'py>(py: Python<'py>, result: &TickResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("tick", result.tick)?;
    dict.set_item("num_completed", result.num_completed)?;
    dict.set_item("num_admitted", result.num_admitted)?;
    dict.set_item("num_waiting", result.num_waiting)?;
    dict.set_item("num_running", result.num_running)?;
    dict.set_item("free_resources", result.free_resources)?;

    Ok(dict)
}

/// Convert SimulationSnapshot to Python dict
pub fn snapshot_to_py<'py>(
    py: Python<'py>,
    snapshot: &SimulationSnapshot,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("tick", snapshot.tick)?;
    dict.set_item("capacity", snapshot.capacity)?;
    dict.set_item("free_resources", snapshot.free_resources)?;
    dict.set_item("running", snapshot.running.clone())?;
    dict.set_item("waiting", snapshot.waiting.clone())?;

    Ok(dict)
}
