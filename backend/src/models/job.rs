//! Job model
//!
//! A job is one call-out that needs an ambulance for a fixed number of ticks.
//! Each job has:
//! - Caller-assigned ID
//! - Priority (lower value = more urgent)
//! - Duration and remaining ticks of work
//! - Submission tick (set once, by the simulator)
//! - Lifecycle status (Created, Waiting, Running, Completed)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Caller-assigned job identifier
pub type JobId = u64;

/// Urgency marker; **lower numeric value is served first**
pub type Priority = i32;

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Constructed by the caller, not yet handed to a simulator
    Created,

    /// Submitted and waiting for a free resource
    Waiting,

    /// Occupying a resource
    Running {
        /// Tick at which the job was admitted
        admitted_tick: usize,
    },

    /// Remaining duration exhausted
    Completed {
        /// Tick at which completion was processed
        tick: usize,
    },
}

/// Errors that can occur during job operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("Job duration must be positive, got {duration}")]
    InvalidDuration { duration: i64 },

    #[error("Job {id} has not been submitted")]
    NotSubmitted { id: JobId },

    #[error("Job {id} was submitted at tick {submitted}, after tick {now}")]
    TimeBeforeSubmit {
        id: JobId,
        now: usize,
        submitted: usize,
    },

    #[error("Job {id} has {remaining} ticks remaining out of {duration}")]
    InvalidRemaining {
        id: JobId,
        remaining: i64,
        duration: i64,
    },
}

/// A prioritized unit of work
///
/// # Example
/// ```
/// use ambulance_simulator_core_rs::Job;
///
/// let mut job = Job::new(7, 1, 2).unwrap();
/// assert!(!job.is_done());
///
/// job.tick();
/// job.tick();
/// assert!(job.is_done());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "JobRecord")]
pub struct Job {
    id: JobId,

    priority: Priority,

    /// Requested run length in ticks
    duration: i64,

    /// Ticks of work left; the job is done once this reaches 0
    remaining: i64,

    /// Tick at which the job entered the waiting queue
    submit_tick: Option<usize>,

    status: JobStatus,
}

/// Unchecked wire form of `Job`; converted through `Job::validate`
#[derive(Deserialize)]
struct JobRecord {
    id: JobId,
    priority: Priority,
    duration: i64,
    remaining: i64,
    submit_tick: Option<usize>,
    status: JobStatus,
}

impl TryFrom<JobRecord> for Job {
    type Error = JobError;

    fn try_from(record: JobRecord) -> Result<Self, Self::Error> {
        let job = Job {
            id: record.id,
            priority: record.priority,
            duration: record.duration,
            remaining: record.remaining,
            submit_tick: record.submit_tick,
            status: record.status,
        };
        job.validate()?;
        Ok(job)
    }
}

impl Job {
    /// Create a new job
    ///
    /// # Errors
    /// Returns `JobError::InvalidDuration` if `duration <= 0`
    pub fn new(id: JobId, priority: Priority, duration: i64) -> Result<Self, JobError> {
        if duration <= 0 {
            return Err(JobError::InvalidDuration { duration });
        }

        Ok(Self {
            id,
            priority,
            duration,
            remaining: duration,
            submit_tick: None,
            status: JobStatus::Created,
        })
    }

    /// Check that the duration is positive and `remaining` never exceeds it
    pub fn validate(&self) -> Result<(), JobError> {
        if self.duration <= 0 {
            return Err(JobError::InvalidDuration {
                duration: self.duration,
            });
        }
        if self.remaining > self.duration {
            return Err(JobError::InvalidRemaining {
                id: self.id,
                remaining: self.remaining,
                duration: self.duration,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Original duration in ticks
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Ticks of work still to do
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Submission tick, if the job has been handed to a simulator
    pub fn submit_tick(&self) -> Option<usize> {
        self.submit_tick
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Check whether the job has been submitted
    pub fn is_submitted(&self) -> bool {
        self.submit_tick.is_some()
    }

    /// Run one tick of work
    ///
    /// Only meaningful while the job is running; the simulator never calls it
    /// on waiting jobs.
    pub fn tick(&mut self) {
        self.remaining -= 1;
    }

    /// Check if the job has exhausted its duration
    pub fn is_done(&self) -> bool {
        self.remaining <= 0
    }

    /// Ticks elapsed between submission and `now`
    ///
    /// # Errors
    /// - `JobError::NotSubmitted` if the submission tick was never set
    /// - `JobError::TimeBeforeSubmit` if `now` precedes the submission tick
    ///
    /// # Example
    /// ```
    /// use ambulance_simulator_core_rs::{Job, JobError};
    ///
    /// let mut job = Job::new(1, 2, 4).unwrap();
    /// assert_eq!(job.time_since_submit(3), Err(JobError::NotSubmitted { id: 1 }));
    ///
    /// job.set_submit_time(3);
    /// assert_eq!(job.time_since_submit(8), Ok(5));
    /// ```
    pub fn time_since_submit(&self, now: usize) -> Result<usize, JobError> {
        let submitted = self
            .submit_tick
            .ok_or(JobError::NotSubmitted { id: self.id })?;

        now.checked_sub(submitted)
            .ok_or(JobError::TimeBeforeSubmit {
                id: self.id,
                now,
                submitted,
            })
    }

    /// Stamp the submission tick and mark the job as waiting
    ///
    /// Intended to be called once, by the simulator. A second call overwrites
    /// the previous stamp.
    pub fn set_submit_time(&mut self, tick: usize) {
        self.submit_tick = Some(tick);
        self.status = JobStatus::Waiting;
    }

    /// Compare two jobs by urgency alone
    ///
    /// `Ordering::Less` means `self` is more urgent (lower priority value).
    pub fn cmp_priority(&self, other: &Job) -> Ordering {
        self.priority.cmp(&other.priority)
    }

    pub(crate) fn mark_running(&mut self, tick: usize) {
        self.status = JobStatus::Running {
            admitted_tick: tick,
        };
    }

    pub(crate) fn mark_completed(&mut self, tick: usize) {
        self.status = JobStatus::Completed { tick };
    }
}
