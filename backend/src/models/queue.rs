//! Waiting queue
//!
//! Holds submitted jobs that have not been admitted yet and always yields the
//! most urgent one first.
//!
//! # Ordering
//!
//! Entries are keyed by `(priority, sequence)`:
//! - Lower priority value comes out first
//! - Among equal priorities, the earlier submission comes out first
//!
//! `std::collections::BinaryHeap` is a max-heap, so `QueuedJob` flips its
//! `Ord` to make the smallest key the heap top.

use crate::models::job::{Job, JobId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A job plus its submission sequence number
#[derive(Debug, Clone)]
struct QueuedJob {
    sequence: u64,
    job: Job,
}

impl QueuedJob {
    fn key(&self) -> (crate::models::job::Priority, u64) {
        (self.job.priority(), self.sequence)
    }
}

impl PartialEq for QueuedJob {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedJob {}

impl PartialOrd for QueuedJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed: the smallest (priority, sequence) is the "greatest" heap entry
impl Ord for QueuedJob {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Priority-ordered queue of waiting jobs
///
/// # Example
/// ```
/// use ambulance_simulator_core_rs::{Job, WaitingQueue};
///
/// let mut queue = WaitingQueue::new();
/// queue.push(Job::new(1, 2, 4).unwrap());
/// queue.push(Job::new(2, 1, 5).unwrap());
///
/// assert_eq!(queue.pop().map(|j| j.id()), Some(2));
/// assert_eq!(queue.pop().map(|j| j.id()), Some(1));
/// assert!(queue.pop().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    heap: BinaryHeap<QueuedJob>,
    next_sequence: u64,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job behind every queued job of equal or higher urgency
    pub fn push(&mut self, job: Job) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(QueuedJob { sequence, job });
    }

    /// Remove and return the most urgent job
    pub fn pop(&mut self) -> Option<Job> {
        self.heap.pop().map(|entry| entry.job)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Look up a waiting job by ID
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.heap
            .iter()
            .map(|entry| &entry.job)
            .find(|job| job.id() == id)
    }

    /// Job IDs in the order they would be admitted
    pub fn ids_in_order(&self) -> Vec<JobId> {
        let mut entries: Vec<&QueuedJob> = self.heap.iter().collect();
        // Descending by the reversed Ord == ascending by (priority, sequence)
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|entry| entry.job.id()).collect()
    }
}
