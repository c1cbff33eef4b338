//! Property tests for the Simulator
//!
//! Random interleavings of submissions and ticks must preserve resource
//! conservation, priority/FIFO admission order and consistent statistics.

use ambulance_simulator_core_rs::{Event, Job, JobId, Priority, Simulator};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Add { priority: Priority, duration: i64 },
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1..=4i32, 1..=6i64).prop_map(|(priority, duration)| Op::Add { priority, duration }),
        Just(Op::Tick),
    ]
}

/// Apply `ops`, checking resource conservation after each step
fn apply(capacity: usize, ops: &[Op]) -> (Simulator, usize) {
    let mut sim = Simulator::with_capacity(capacity);
    let mut next_id: JobId = 0;

    for op in ops {
        match op {
            Op::Add { priority, duration } => {
                sim.add(Job::new(next_id, *priority, *duration).unwrap()).unwrap();
                next_id += 1;
            }
            Op::Tick => {
                sim.tick().unwrap();
            }
        }

        assert_eq!(sim.free_resources() + sim.num_running(), capacity);
        assert!(sim.num_running() <= capacity);
        assert!(sim.state().check_invariants().is_ok());
    }

    (sim, next_id as usize)
}

fn drain(sim: &mut Simulator) {
    // Bounded: every job is at most 6 ticks long
    for _ in 0..1000 {
        if sim.all_done() {
            return;
        }
        sim.tick().unwrap();
    }
    panic!("simulator did not drain");
}

proptest! {
    #[test]
    fn prop_resource_conservation(capacity in 0usize..=4, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let (sim, submitted) = apply(capacity, &ops);

        let completed = sim.stats().total_completed() as usize;
        prop_assert_eq!(sim.num_waiting() + sim.num_running() + completed, submitted);
    }

    #[test]
    fn prop_running_and_waiting_are_disjoint(capacity in 0usize..=4, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let (sim, _) = apply(capacity, &ops);

        let running = sim.running_job_ids();
        for id in sim.waiting_job_ids() {
            prop_assert!(!running.contains(&id));
        }
    }

    #[test]
    fn prop_equal_priorities_admitted_in_submission_order(capacity in 1usize..=4, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let (mut sim, _) = apply(capacity, &ops);
        drain(&mut sim);

        // IDs are handed out in submission order
        let mut last_admitted: BTreeMap<Priority, JobId> = BTreeMap::new();
        for event in sim.event_log().events_of_type("Admitted") {
            if let Some(previous) = last_admitted.insert(event.priority(), event.job_id()) {
                prop_assert!(previous < event.job_id());
            }
        }
    }

    #[test]
    fn prop_averages_match_completion_log(capacity in 1usize..=4, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let (mut sim, submitted) = apply(capacity, &ops);
        drain(&mut sim);

        prop_assert_eq!(sim.stats().total_completed() as usize, submitted);

        let mut sums: BTreeMap<Priority, (usize, usize)> = BTreeMap::new();
        for event in sim.event_log().events() {
            if let Event::Completed { priority, latency, .. } = event {
                let entry = sums.entry(*priority).or_default();
                entry.0 += latency;
                entry.1 += 1;
            }
        }

        for (priority, (sum, count)) in sums {
            let expected = sum as f64 / count as f64;
            prop_assert_eq!(sim.average_job_completion_time(priority).unwrap(), expected);
        }
    }

    #[test]
    fn prop_latency_is_wait_plus_duration(capacity in 1usize..=4, ops in prop::collection::vec(op_strategy(), 0..80)) {
        let (mut sim, _) = apply(capacity, &ops);
        drain(&mut sim);

        let log = sim.event_log();
        let mut duration: BTreeMap<JobId, i64> = BTreeMap::new();
        let mut waited: BTreeMap<JobId, usize> = BTreeMap::new();

        for event in log.events() {
            match event {
                Event::Submitted { job_id, duration: d, .. } => {
                    duration.insert(*job_id, *d);
                }
                Event::Admitted { job_id, waited: w, .. } => {
                    waited.insert(*job_id, *w);
                }
                Event::Completed { job_id, latency, .. } => {
                    let expected = waited[job_id] + duration[job_id] as usize;
                    prop_assert_eq!(*latency, expected);
                }
            }
        }
    }
}
