//! Tests for per-priority completion statistics

use ambulance_simulator_core_rs::{CompletionStats, Job, PriorityStats, Simulator};

#[test]
fn test_no_data_is_distinct_from_zero() {
    let mut stats = CompletionStats::new();
    assert_eq!(stats.average(1), None);
    assert!(stats.get(1).is_none());

    stats.record(1, 0);
    assert_eq!(stats.average(1), Some(0.0));
}

#[test]
fn test_record_accumulates() {
    let mut stats = CompletionStats::new();
    stats.record(2, 10);
    stats.record(2, 20);
    stats.record(2, 3);

    assert_eq!(
        stats.get(2),
        Some(&PriorityStats {
            completed: 3,
            total_latency: 33,
        })
    );
    assert_eq!(stats.average(2), Some(11.0));
}

#[test]
fn test_priorities_are_independent() {
    let mut stats = CompletionStats::new();
    stats.record(1, 4);
    stats.record(3, 9);

    assert_eq!(stats.average(1), Some(4.0));
    assert_eq!(stats.average(3), Some(9.0));
    assert_eq!(stats.average(2), None);
    assert_eq!(stats.priorities().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn test_latency_includes_waiting_time() {
    // One ambulance, three equal-priority jobs of duration 2.
    // Admissions at ticks 0, 2, 4; completions at ticks 2, 4, 6.
    let mut sim = Simulator::with_capacity(1);
    for id in 1..=3 {
        sim.add(Job::new(id, 1, 2).unwrap()).unwrap();
    }
    while !sim.all_done() {
        sim.tick().unwrap();
    }

    let totals = sim.stats().get(1).unwrap();
    assert_eq!(totals.completed, 3);
    assert_eq!(totals.total_latency, 2 + 4 + 6);
    assert_eq!(sim.average_job_completion_time(1).unwrap(), 4.0);
}

#[test]
fn test_stats_serialize_round_trip() {
    let mut stats = CompletionStats::new();
    stats.record(1, 5);
    stats.record(4, 8);

    let json = serde_json::to_string(&stats).unwrap();
    let back: CompletionStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);
}
