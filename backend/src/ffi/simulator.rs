//! PyO3 wrapper for Simulator
//!
//! # Example (from Python)
//!
//! ```python
//! from ambulance_simulator_core_rs import Simulator
//!
//! sim = Simulator({"capacity": 4})
//! sim.add(1, 1, 2)
//! for _ in range(3):
//!     sim.tick()
//! assert sim.all_done()
//! print(sim.average_job_completion_time(1))
//! ```

use std::collections::BTreeSet;

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulator_config, snapshot_to_py, tick_result_to_py};
use crate::models::job::{Job, JobId, Priority};
use crate::orchestrator::{SimulationError, Simulator as RustSimulator};

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::NoCompletions { .. } => PyKeyError::new_err(err.to_string()),
        SimulationError::InvalidConfig(_) | SimulationError::AlreadySubmitted { .. } => {
            PyValueError::new_err(err.to_string())
        }
        SimulationError::Job(_) => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Python wrapper for Rust Simulator
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    inner: RustSimulator,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from a config dict
    ///
    /// Raises ValueError for a negative capacity.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_simulator_config(dict)?,
            None => Default::default(),
        };

        let inner = RustSimulator::new(rust_config).map_err(to_py_err)?;
        Ok(PySimulator { inner })
    }

    /// Submit a job; raises ValueError for a non-positive duration
    fn add(&mut self, id: JobId, priority: Priority, duration: i64) -> PyResult<()> {
        let job = Job::new(id, priority, duration)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.inner.add(job).map_err(to_py_err)
    }

    /// Execute one tick and return its summary dict
    fn tick<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let result = self.inner.tick().map_err(to_py_err)?;
        tick_result_to_py(py, &result)
    }

    fn current_tick(&self) -> usize {
        self.inner.current_tick()
    }

    fn all_done(&self) -> bool {
        self.inner.all_done()
    }

    /// IDs of running jobs, as a Python set
    fn running_jobs(&self) -> BTreeSet<JobId> {
        self.inner.running_job_ids()
    }

    /// Raises KeyError if no job of that priority has completed
    fn average_job_completion_time(&self, priority: Priority) -> PyResult<f64> {
        self.inner
            .average_job_completion_time(priority)
            .map_err(to_py_err)
    }

    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        snapshot_to_py(py, &self.inner.snapshot())
    }
}
