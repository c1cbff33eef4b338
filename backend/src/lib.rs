//! Ambulance Simulator Core - Rust Engine
//!
//! Discrete-time simulation of a fixed fleet of interchangeable resources
//! ("ambulances") serving a stream of prioritized, variable-duration jobs.
//!
//! # Architecture
//!
//! - **core**: Tick clock
//! - **models**: Domain types (Job, WaitingQueue, SimulationState, CompletionStats, Event)
//! - **orchestrator**: The `Simulator` and its tick algorithm
//! - **arrivals**: Deterministic random workload generation
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Lower priority value = more urgent
//! 2. `free_resources + running == capacity` after every tick
//! 3. Admission happens only inside `tick`, never in `add`
//! 4. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, PriorityDistribution, WorkloadGenerator};
pub use core::time::TimeManager;
pub use models::{
    event::{Event, EventLog},
    job::{Job, JobError, JobId, JobStatus, Priority},
    queue::WaitingQueue,
    state::SimulationState,
    stats::{CompletionStats, PriorityStats},
};
pub use orchestrator::{
    SimulationError, SimulationSnapshot, Simulator, SimulatorConfig, TickResult, DEFAULT_CAPACITY,
};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn ambulance_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    Ok(())
}
