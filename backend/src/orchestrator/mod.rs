//! Orchestrator - the tick loop
//!
//! See `engine.rs` for the scheduling algorithm.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    SimulationError, SimulationSnapshot, Simulator, SimulatorConfig, TickResult,
    DEFAULT_CAPACITY,
};
