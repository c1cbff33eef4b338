//! Simulator Engine
//!
//! The scheduling core: owns the clock, the resource pool, the waiting queue,
//! the running set and the completion statistics, and advances them one
//! discrete tick at a time.
//!
//! # Tick Algorithm
//!
//! ```text
//! For each tick t:
//! 1. Advance every running job by one tick; reclaim finished jobs
//!    (record latency = t - submit_tick, free their resource)
//! 2. Admit waiting jobs, most urgent first, while a resource is free
//! 3. Advance time to t + 1
//! ```
//!
//! Resources freed in step 1 are available to step 2 of the same tick. A job
//! admitted in step 2 is first advanced in step 1 of the *next* tick, so a job
//! of duration D submitted with capacity available completes D + 1 ticks
//! after submission.
//!
//! # Example
//!
//! ```rust
//! use ambulance_simulator_core_rs::{Job, Simulator};
//!
//! let mut sim = Simulator::with_capacity(4);
//! sim.add(Job::new(1, 1, 2).unwrap()).unwrap();
//!
//! for _ in 0..3 {
//!     sim.tick().unwrap();
//! }
//!
//! assert!(sim.all_done());
//! assert_eq!(sim.average_job_completion_time(1).unwrap(), 2.0);
//! ```

use crate::core::time::TimeManager;
use crate::models::event::{Event, EventLog};
use crate::models::job::{Job, JobError, JobId, Priority};
use crate::models::state::SimulationState;
use crate::models::stats::CompletionStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Fleet size used by `SimulatorConfig::default()`
pub const DEFAULT_CAPACITY: i64 = 4;

fn default_record_events() -> bool {
    true
}

/// Simulator configuration
///
/// `capacity` is signed so that configuration read from JSON or a CLI flag
/// can be validated instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of interchangeable resource units (ambulances); must be >= 0
    pub capacity: i64,

    /// Keep a full `EventLog` of submissions, admissions and completions
    #[serde(default = "default_record_events")]
    pub record_events: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            record_events: true,
        }
    }
}

impl SimulatorConfig {
    /// Config with the given capacity and event recording on
    pub fn with_capacity(capacity: i64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Tick that was executed (the clock now reads `tick + 1`)
    pub tick: usize,

    /// Jobs that finished in step 1
    pub num_completed: usize,

    /// Jobs admitted in step 2
    pub num_admitted: usize,

    /// Queue length after admission
    pub num_waiting: usize,

    /// Running set size after admission
    pub num_running: usize,

    /// Idle resources after admission
    pub free_resources: usize,
}

/// Read-only view of the simulator for display collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub tick: usize,
    pub capacity: usize,
    pub free_resources: usize,
    /// Running job IDs, ascending
    pub running: Vec<JobId>,
    /// Waiting job IDs in admission order
    pub waiting: Vec<JobId>,
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Job {id} has already been submitted")]
    AlreadySubmitted { id: JobId },

    #[error("No jobs of priority {priority} have completed")]
    NoCompletions { priority: Priority },

    #[error("Job error: {0}")]
    Job(#[from] JobError),
}

// ============================================================================
// Simulator
// ============================================================================

/// The scheduling core
///
/// Sole owner and mutator of every submitted job. Drivers interact through
/// `add`, `tick` and the read-only queries.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Resource pool, waiting queue and running set
    state: SimulationState,

    time_manager: TimeManager,

    /// Per-priority completion totals
    stats: CompletionStats,

    event_log: EventLog,

    record_events: bool,
}

impl Simulator {
    /// Create a simulator from configuration
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfig` if `capacity` is negative or does
    /// not fit in `usize`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ambulance_simulator_core_rs::{Simulator, SimulatorConfig};
    ///
    /// assert!(Simulator::new(SimulatorConfig::with_capacity(-1)).is_err());
    ///
    /// let sim = Simulator::new(SimulatorConfig::with_capacity(3)).unwrap();
    /// assert_eq!(sim.free_resources(), 3);
    /// ```
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulationError> {
        let capacity = Self::validate_config(&config)?;
        Ok(Self::from_parts(capacity, config.record_events))
    }

    /// Create a simulator with `capacity` resources and default settings
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(capacity, SimulatorConfig::default().record_events)
    }

    fn from_parts(capacity: usize, record_events: bool) -> Self {
        Self {
            state: SimulationState::new(capacity),
            time_manager: TimeManager::new(),
            stats: CompletionStats::new(),
            event_log: EventLog::new(),
            record_events,
        }
    }

    fn validate_config(config: &SimulatorConfig) -> Result<usize, SimulationError> {
        if config.capacity < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "capacity must be >= 0, got {}",
                config.capacity
            )));
        }

        usize::try_from(config.capacity).map_err(|_| {
            SimulationError::InvalidConfig(format!(
                "capacity {} does not fit this platform",
                config.capacity
            ))
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tick (number of completed `tick` calls)
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    /// True iff no job is waiting or running
    pub fn all_done(&self) -> bool {
        self.state.is_idle()
    }

    /// IDs of jobs occupying a resource (waiting jobs excluded)
    pub fn running_job_ids(&self) -> BTreeSet<JobId> {
        self.state.running().iter().map(Job::id).collect()
    }

    /// IDs of waiting jobs in the order they would be admitted
    pub fn waiting_job_ids(&self) -> Vec<JobId> {
        self.state.waiting().ids_in_order()
    }

    /// Average ticks from submission to completion for `priority`
    ///
    /// # Errors
    ///
    /// `SimulationError::NoCompletions` if no job of that priority has
    /// completed yet. This is distinct from a measured average of 0.
    pub fn average_job_completion_time(&self, priority: Priority) -> Result<f64, SimulationError> {
        self.stats
            .average(priority)
            .ok_or(SimulationError::NoCompletions { priority })
    }

    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    pub fn free_resources(&self) -> usize {
        self.state.free_resources()
    }

    pub fn num_waiting(&self) -> usize {
        self.state.num_waiting()
    }

    pub fn num_running(&self) -> usize {
        self.state.num_running()
    }

    /// Look up a waiting or running job
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.state.get_job(id)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn stats(&self) -> &CompletionStats {
        &self.stats
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Capture the current state for a display feed
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.current_tick(),
            capacity: self.capacity(),
            free_resources: self.free_resources(),
            running: self.running_job_ids().into_iter().collect(),
            waiting: self.waiting_job_ids(),
        }
    }

    fn log_event(&mut self, event: Event) {
        if self.record_events {
            self.event_log.log(event);
        }
    }

    // ========================================================================
    // Driver Operations
    // ========================================================================

    /// Submit a job
    ///
    /// Stamps the submission tick and queues the job. The job is never
    /// admitted here, even when a resource is free; admission happens only
    /// inside `tick`.
    ///
    /// # Errors
    ///
    /// - `SimulationError::AlreadySubmitted` if the job already carries a
    ///   submission stamp
    /// - `SimulationError::Job` if the duration is not positive or no work
    ///   is left to do
    pub fn add(&mut self, mut job: Job) -> Result<(), SimulationError> {
        if job.is_submitted() {
            return Err(SimulationError::AlreadySubmitted { id: job.id() });
        }

        job.validate()?;
        if job.remaining() <= 0 {
            return Err(JobError::InvalidRemaining {
                id: job.id(),
                remaining: job.remaining(),
                duration: job.duration(),
            }
            .into());
        }

        let now = self.current_tick();
        job.set_submit_time(now);

        tracing::trace!(tick = now, job_id = job.id(), priority = job.priority(), "job submitted");
        self.log_event(Event::Submitted {
            tick: now,
            job_id: job.id(),
            priority: job.priority(),
            duration: job.duration(),
        });

        self.state.enqueue(job);
        Ok(())
    }

    /// Execute one simulation tick
    ///
    /// 1. Advance running jobs and reclaim finished ones into the statistics
    /// 2. Admit waiting jobs while resources are free
    /// 3. Advance time
    ///
    /// # Errors
    ///
    /// `SimulationError::Job` if a running job has no usable submission
    /// stamp. The check runs before anything is mutated, so on error the
    /// simulator is unchanged.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let now = self.current_tick();

        for job in self.state.running() {
            job.time_since_submit(now)?;
        }

        // STEP 1: ADVANCE AND RECLAIM
        for job in self.state.running_mut() {
            job.tick();
        }

        let finished = self.state.release_finished();
        let num_completed = finished.len();

        for mut job in finished {
            let latency = job.time_since_submit(now)?;
            self.stats.record(job.priority(), latency);
            job.mark_completed(now);

            tracing::debug!(tick = now, job_id = job.id(), priority = job.priority(), latency, "job completed");
            self.log_event(Event::Completed {
                tick: now,
                job_id: job.id(),
                priority: job.priority(),
                latency,
            });
        }

        // STEP 2: ADMISSION
        let mut num_admitted = 0;
        while let Some(job) = self.state.admit_next() {
            job.mark_running(now);
            let event = Event::Admitted {
                tick: now,
                job_id: job.id(),
                priority: job.priority(),
                waited: job.time_since_submit(now)?,
            };
            num_admitted += 1;

            tracing::debug!(tick = now, job_id = event.job_id(), priority = event.priority(), "job admitted");
            self.log_event(event);
        }

        // STEP 3: ADVANCE TIME
        self.time_manager.advance_tick();

        debug_assert!(
            self.state.check_invariants().is_ok(),
            "resource invariant violated after tick {}",
            now
        );

        let result = TickResult {
            tick: now,
            num_completed,
            num_admitted,
            num_waiting: self.state.num_waiting(),
            num_running: self.state.num_running(),
            free_resources: self.state.free_resources(),
        };
        tracing::trace!(?result, "tick finished");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_valid() {
        let mut sim = Simulator::new(SimulatorConfig::with_capacity(0)).unwrap();
        sim.add(Job::new(1, 1, 1).unwrap()).unwrap();
        sim.tick().unwrap();

        assert_eq!(sim.num_waiting(), 1);
        assert!(!sim.all_done());
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let err = Simulator::new(SimulatorConfig::with_capacity(-4)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_with_capacity_matches_default_config() {
        let a = Simulator::with_capacity(DEFAULT_CAPACITY as usize);
        let b = Simulator::new(SimulatorConfig::default()).unwrap();

        assert_eq!(a.capacity(), b.capacity());
        assert_eq!(a.free_resources(), b.free_resources());
        assert_eq!(a.record_events, b.record_events);
    }

    #[test]
    fn test_add_does_not_admit() {
        let mut sim = Simulator::with_capacity(2);
        sim.add(Job::new(1, 1, 3).unwrap()).unwrap();

        assert!(sim.running_job_ids().is_empty());
        assert_eq!(sim.free_resources(), 2);
        assert_eq!(sim.num_waiting(), 1);
    }

    #[test]
    fn test_resubmission_rejected() {
        let mut sim = Simulator::with_capacity(1);
        let mut job = Job::new(5, 1, 3).unwrap();
        job.set_submit_time(0);

        assert_eq!(
            sim.add(job),
            Err(SimulationError::AlreadySubmitted { id: 5 })
        );
        assert!(sim.all_done());
    }

    #[test]
    fn test_event_recording_can_be_disabled() {
        let config = SimulatorConfig {
            capacity: 1,
            record_events: false,
        };
        let mut sim = Simulator::new(config).unwrap();
        sim.add(Job::new(1, 1, 1).unwrap()).unwrap();
        sim.tick().unwrap();
        sim.tick().unwrap();

        assert!(sim.all_done());
        assert!(sim.event_log().is_empty());
    }

    #[test]
    fn test_tick_result_counts() {
        let mut sim = Simulator::with_capacity(1);
        sim.add(Job::new(1, 1, 1).unwrap()).unwrap();
        sim.add(Job::new(2, 2, 1).unwrap()).unwrap();

        let first = sim.tick().unwrap();
        assert_eq!(first.tick, 0);
        assert_eq!(first.num_admitted, 1);
        assert_eq!(first.num_completed, 0);
        assert_eq!(first.num_waiting, 1);

        // Job 1 finishes and job 2 takes its ambulance in the same tick
        let second = sim.tick().unwrap();
        assert_eq!(second.num_completed, 1);
        assert_eq!(second.num_admitted, 1);
        assert_eq!(second.free_resources, 0);
        assert_eq!(sim.running_job_ids(), BTreeSet::from([2]));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut sim = Simulator::with_capacity(1);
        sim.add(Job::new(1, 3, 4).unwrap()).unwrap();
        sim.add(Job::new(2, 1, 4).unwrap()).unwrap();
        sim.add(Job::new(3, 2, 4).unwrap()).unwrap();
        sim.tick().unwrap();

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.running, vec![2]);
        assert_eq!(snapshot.waiting, vec![3, 1]);
        assert_eq!(snapshot.free_resources, 0);
    }

    #[test]
    fn test_config_deserialize_defaults_record_events() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"capacity": 6}"#).unwrap();
        assert_eq!(config.capacity, 6);
        assert!(config.record_events);
    }
}
