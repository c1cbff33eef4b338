//! Text timeline of simulator snapshots

use ambulance_simulator_core_rs::SimulationSnapshot;
use std::fmt::Write;

/// One snapshot per tick, rendered as `tick | ####.. | waiting=N`
///
/// Each `#` is a busy ambulance and each `.` an idle one.
#[derive(Debug, Default)]
pub struct Timeline {
    snapshots: Vec<SimulationSnapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, snapshot: SimulationSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn render_line(snapshot: &SimulationSnapshot) -> String {
        let busy = snapshot.running.len();
        format!(
            "{:>6} | {}{} | waiting={}",
            snapshot.tick,
            "#".repeat(busy),
            ".".repeat(snapshot.free_resources),
            snapshot.waiting.len()
        )
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for snapshot in &self.snapshots {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{}", Self::render_line(snapshot));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tick: usize, running: Vec<u64>, free: usize, waiting: Vec<u64>) -> SimulationSnapshot {
        SimulationSnapshot {
            tick,
            capacity: running.len() + free,
            free_resources: free,
            running,
            waiting,
        }
    }

    #[test]
    fn test_render_line() {
        let line = Timeline::render_line(&snapshot(12, vec![3, 4], 2, vec![7]));
        assert_eq!(line, "    12 | ##.. | waiting=1");
    }

    #[test]
    fn test_render_one_line_per_snapshot() {
        let mut timeline = Timeline::new();
        timeline.record(snapshot(1, vec![], 1, vec![]));
        timeline.record(snapshot(2, vec![1], 0, vec![2, 3]));

        let rendered = timeline.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["     1 | . | waiting=0", "     2 | # | waiting=2"]);
        assert_eq!(timeline.len(), 2);
    }
}
