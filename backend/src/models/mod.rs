//! Domain models for the ambulance simulator

pub mod event;
pub mod job;
pub mod queue;
pub mod state;
pub mod stats;

// Re-exports
pub use event::{Event, EventLog};
pub use job::{Job, JobError, JobId, JobStatus, Priority};
pub use queue::WaitingQueue;
pub use state::SimulationState;
pub use stats::{CompletionStats, PriorityStats};
