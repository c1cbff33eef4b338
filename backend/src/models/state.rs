//! Simulation State
//!
//! Holds the resource pool together with the two places a live job can be:
//! the waiting queue and the running set.
//!
//! # Critical Invariants
//!
//! 1. **Resource Conservation**: `free_resources + running.len() == capacity`
//! 2. **Single Residence**: a job is either waiting, running, or gone
//!
//! Only `Simulator` mutates this struct; the primitives below each preserve
//! invariant 1 on their own.

use crate::models::job::{Job, JobId};
use crate::models::queue::WaitingQueue;

/// Resource pool, waiting queue and running set
///
/// # Example
///
/// ```rust
/// use ambulance_simulator_core_rs::{Job, SimulationState};
///
/// let mut state = SimulationState::new(2);
/// state.enqueue(Job::new(1, 1, 3).unwrap());
///
/// assert_eq!(state.free_resources(), 2);
/// assert_eq!(state.num_waiting(), 1);
/// assert_eq!(state.num_running(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Total resource units (ambulances) in the pool
    capacity: usize,

    /// Units not currently occupied by a running job
    free_resources: usize,

    /// Submitted jobs awaiting a resource
    waiting: WaitingQueue,

    /// Jobs occupying a resource; order carries no meaning
    running: Vec<Job>,
}

impl SimulationState {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free_resources: capacity,
            waiting: WaitingQueue::new(),
            running: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_resources(&self) -> usize {
        self.free_resources
    }

    pub fn num_waiting(&self) -> usize {
        self.waiting.len()
    }

    pub fn num_running(&self) -> usize {
        self.running.len()
    }

    pub fn waiting(&self) -> &WaitingQueue {
        &self.waiting
    }

    pub fn running(&self) -> &[Job] {
        &self.running
    }

    /// True when no job is waiting or running
    pub fn is_idle(&self) -> bool {
        self.waiting.is_empty() && self.running.is_empty()
    }

    /// Find a live (waiting or running) job
    pub fn get_job(&self, id: JobId) -> Option<&Job> {
        self.running
            .iter()
            .find(|job| job.id() == id)
            .or_else(|| self.waiting.get(id))
    }

    /// Put a submitted job in the waiting queue
    pub fn enqueue(&mut self, job: Job) {
        self.waiting.push(job);
    }

    pub(crate) fn running_mut(&mut self) -> &mut [Job] {
        &mut self.running
    }

    /// Remove every finished job from the running set, returning its resource
    /// to the pool
    pub(crate) fn release_finished(&mut self) -> Vec<Job> {
        let (finished, still_running): (Vec<Job>, Vec<Job>) =
            std::mem::take(&mut self.running)
                .into_iter()
                .partition(Job::is_done);

        self.running = still_running;
        self.free_resources += finished.len();
        finished
    }

    /// Move the most urgent waiting job into the running set if a resource
    /// is free
    pub(crate) fn admit_next(&mut self) -> Option<&mut Job> {
        if self.free_resources == 0 {
            return None;
        }

        let job = self.waiting.pop()?;
        self.free_resources -= 1;
        self.running.push(job);
        self.running.last_mut()
    }

    /// Verify resource conservation
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.free_resources + self.running.len() != self.capacity {
            return Err(format!(
                "free ({}) + running ({}) != capacity ({})",
                self.free_resources,
                self.running.len(),
                self.capacity
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(id: JobId, priority: i32, duration: i64) -> Job {
        let mut job = Job::new(id, priority, duration).unwrap();
        job.set_submit_time(0);
        job
    }

    #[test]
    fn test_admit_respects_capacity() {
        let mut state = SimulationState::new(1);
        state.enqueue(submitted(1, 1, 2));
        state.enqueue(submitted(2, 1, 2));

        assert!(state.admit_next().is_some());
        assert!(state.admit_next().is_none());
        assert_eq!(state.num_running(), 1);
        assert_eq!(state.num_waiting(), 1);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_zero_capacity_never_admits() {
        let mut state = SimulationState::new(0);
        state.enqueue(submitted(1, 1, 1));

        assert!(state.admit_next().is_none());
        assert_eq!(state.num_waiting(), 1);
    }

    #[test]
    fn test_release_finished_returns_resources() {
        let mut state = SimulationState::new(2);
        state.enqueue(submitted(1, 1, 1));
        state.enqueue(submitted(2, 1, 3));
        state.admit_next();
        state.admit_next();
        assert_eq!(state.free_resources(), 0);

        for job in state.running_mut() {
            job.tick();
        }
        let finished = state.release_finished();

        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id(), 1);
        assert_eq!(state.free_resources(), 1);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_get_job_searches_both_sets() {
        let mut state = SimulationState::new(1);
        state.enqueue(submitted(1, 1, 5));
        state.enqueue(submitted(2, 2, 5));
        state.admit_next();

        assert!(state.get_job(1).is_some());
        assert!(state.get_job(2).is_some());
        assert!(state.get_job(3).is_none());
    }
}
