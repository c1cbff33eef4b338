//! Event logging for simulation history and reporting.
//!
//! Every job lifecycle transition performed by the simulator is captured as
//! an `Event`. The log is the read-only record a display or report uses to
//! reconstruct what happened to a job after the simulator has discarded it.
//!
//! # Event Types
//!
//! - **Submitted**: job entered the waiting queue (`Simulator::add`)
//! - **Admitted**: job moved from waiting to running (tick step 2)
//! - **Completed**: job exhausted its duration and released its resource (tick step 1)
//!
//! # Example
//!
//! ```rust
//! use ambulance_simulator_core_rs::models::Event;
//!
//! let event = Event::Completed {
//!     tick: 6,
//!     job_id: 2,
//!     priority: 1,
//!     latency: 6,
//! };
//!
//! assert_eq!(event.tick(), 6);
//! assert_eq!(event.event_type(), "Completed");
//! ```

use crate::models::job::{JobId, Priority};
use serde::{Deserialize, Serialize};

/// Simulation event capturing a job state change.
///
/// Events are logged in the order they occur within a tick: completions
/// first, then admissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Job handed to the simulator and queued
    Submitted {
        tick: usize,
        job_id: JobId,
        priority: Priority,
        duration: i64,
    },

    /// Job given a free resource
    Admitted {
        tick: usize,
        job_id: JobId,
        priority: Priority,
        /// Ticks spent in the waiting queue
        waited: usize,
    },

    /// Job finished and its resource was reclaimed
    Completed {
        tick: usize,
        job_id: JobId,
        priority: Priority,
        /// Ticks from submission to completion
        latency: usize,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Submitted { tick, .. } => *tick,
            Event::Admitted { tick, .. } => *tick,
            Event::Completed { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Submitted { .. } => "Submitted",
            Event::Admitted { .. } => "Admitted",
            Event::Completed { .. } => "Completed",
        }
    }

    pub fn job_id(&self) -> JobId {
        match self {
            Event::Submitted { job_id, .. } => *job_id,
            Event::Admitted { job_id, .. } => *job_id,
            Event::Completed { job_id, .. } => *job_id,
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Event::Submitted { priority, .. } => *priority,
            Event::Admitted { priority, .. } => *priority,
            Event::Completed { priority, .. } => *priority,
        }
    }
}

/// Event log for storing and querying simulation events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in logging order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events stamped with a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Events of one type ("Submitted", "Admitted" or "Completed")
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Full history of one job
    pub fn events_for_job(&self, job_id: JobId) -> Vec<&Event> {
        self.events.iter().filter(|e| e.job_id() == job_id).collect()
    }
}
