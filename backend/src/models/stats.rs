//! Per-priority completion statistics
//!
//! Tracks, for every priority that has seen at least one completion, how many
//! jobs completed and the sum of their completion latencies (ticks from
//! submission to completion, not run duration).
//!
//! A priority with no completions has no entry at all, so `average` returns
//! `None` rather than a misleading 0.0.

use crate::models::job::Priority;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running totals for one priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityStats {
    /// Number of completed jobs
    pub completed: u64,

    /// Sum of completion latencies in ticks
    pub total_latency: u64,
}

impl PriorityStats {
    /// Mean latency; `None` when nothing has completed
    pub fn average(&self) -> Option<f64> {
        if self.completed == 0 {
            None
        } else {
            Some(self.total_latency as f64 / self.completed as f64)
        }
    }
}

/// Completion statistics keyed by priority
///
/// # Example
/// ```
/// use ambulance_simulator_core_rs::CompletionStats;
///
/// let mut stats = CompletionStats::new();
/// assert_eq!(stats.average(1), None);
///
/// stats.record(1, 4);
/// stats.record(1, 5);
/// assert_eq!(stats.average(1), Some(4.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    by_priority: BTreeMap<Priority, PriorityStats>,
}

impl CompletionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completion at `priority` with the given latency
    pub fn record(&mut self, priority: Priority, latency: usize) {
        let entry = self.by_priority.entry(priority).or_default();
        entry.completed += 1;
        entry.total_latency += latency as u64;
    }

    /// Totals for a priority, if any job at that priority has completed
    pub fn get(&self, priority: Priority) -> Option<&PriorityStats> {
        self.by_priority.get(&priority)
    }

    /// Average completion latency for a priority
    pub fn average(&self, priority: Priority) -> Option<f64> {
        self.get(priority).and_then(PriorityStats::average)
    }

    /// Priorities with at least one completion, most urgent first
    pub fn priorities(&self) -> impl Iterator<Item = Priority> + '_ {
        self.by_priority.keys().copied()
    }

    /// Iterate over `(priority, totals)` pairs, most urgent first
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &PriorityStats)> {
        self.by_priority.iter().map(|(p, s)| (*p, s))
    }

    /// Total completions across all priorities
    pub fn total_completed(&self) -> u64 {
        self.by_priority.values().map(|s| s.completed).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }
}
