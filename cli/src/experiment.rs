//! Experiment drivers
//!
//! `run_experiment` feeds a seeded workload into one simulator and drains it.
//! `sweep` repeats the same workload over a range of fleet sizes and scores
//! each one by `sum of per-priority averages * capacity`; lower is better.

use crate::config::ExperimentConfig;
use crate::display::Timeline;
use ambulance_simulator_core_rs::{
    Priority, RngManager, Simulator, SimulatorConfig, WorkloadGenerator,
};
use anyhow::{bail, Result};
use serde::Serialize;

/// Average completion latency for one priority
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityAverage {
    pub priority: Priority,
    pub completed: u64,
    pub average: f64,
}

/// Outcome of one drained run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub capacity: i64,
    pub seed: u64,
    /// Ticks until the last job completed
    pub total_ticks: usize,
    pub submitted: usize,
    /// Priorities with at least one completion, most urgent first
    pub averages: Vec<PriorityAverage>,
}

impl ExperimentReport {
    /// Fleet cost weighted by responsiveness; lower is better
    pub fn score(&self) -> f64 {
        let sum: f64 = self.averages.iter().map(|a| a.average).sum();
        sum * self.capacity as f64
    }

    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "capacity={} seed={} submitted={} total_ticks={}",
            self.capacity, self.seed, self.submitted, self.total_ticks
        )];
        for avg in &self.averages {
            lines.push(format!(
                "  priority {:>3}: {:>8.3} ticks over {} jobs",
                avg.priority, avg.average, avg.completed
            ));
        }
        lines.join("\n")
    }
}

/// Reports for every capacity in a sweep plus the best one
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub reports: Vec<ExperimentReport>,
    pub best_capacity: i64,
    pub best_score: f64,
}

/// Run the configured workload against `capacity` ambulances until drained
///
/// When `timeline` is given, a snapshot is recorded after every tick.
pub fn run_experiment(
    config: &ExperimentConfig,
    capacity: i64,
    mut timeline: Option<&mut Timeline>,
) -> Result<ExperimentReport> {
    let generator = WorkloadGenerator::new(config.arrivals.clone())?;
    let mut rng = RngManager::new(config.seed);
    let mut sim = Simulator::new(SimulatorConfig {
        capacity,
        record_events: false,
    })?;

    tracing::info!(capacity, seed = config.seed, ticks = config.arrival_ticks, "starting run");

    let mut submitted = 0;
    for tick in 0..config.arrival_ticks {
        if let Some(job) = generator.next_job(tick, &mut rng) {
            sim.add(job)?;
            submitted += 1;
        }
        sim.tick()?;
        if let Some(timeline) = timeline.as_deref_mut() {
            timeline.record(sim.snapshot());
        }
    }

    if sim.capacity() == 0 && !sim.all_done() {
        bail!("capacity 0 cannot drain {} pending jobs", sim.num_waiting());
    }

    while !sim.all_done() {
        sim.tick()?;
        if let Some(timeline) = timeline.as_deref_mut() {
            timeline.record(sim.snapshot());
        }
    }

    let averages = sim
        .stats()
        .iter()
        .filter_map(|(priority, totals)| {
            totals.average().map(|average| PriorityAverage {
                priority,
                completed: totals.completed,
                average,
            })
        })
        .collect();

    let report = ExperimentReport {
        capacity,
        seed: config.seed,
        total_ticks: sim.current_tick(),
        submitted,
        averages,
    };
    tracing::info!(capacity, total_ticks = report.total_ticks, score = report.score(), "run finished");

    Ok(report)
}

/// Run the same seeded workload for every capacity in `min..=max`
pub fn sweep(config: &ExperimentConfig, min: i64, max: i64) -> Result<SweepResult> {
    if min < 1 || min > max {
        bail!("sweep range must satisfy 1 <= min <= max, got {}..={}", min, max);
    }

    let mut reports = Vec::new();
    let mut best: Option<(i64, f64)> = None;

    for capacity in min..=max {
        let report = run_experiment(config, capacity, None)?;
        let score = report.score();
        tracing::debug!(capacity, score, "sweep point");

        // Ties keep the smaller fleet
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((capacity, score)),
        }
        reports.push(report);
    }

    let (best_capacity, best_score) = match best {
        Some(best) => best,
        None => bail!("empty sweep range"),
    };

    Ok(SweepResult {
        reports,
        best_capacity,
        best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambulance_simulator_core_rs::ArrivalConfig;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            seed: 99,
            arrival_ticks: 300,
            arrivals: ArrivalConfig::default(),
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = small_config();
        let a = run_experiment(&config, 4, None).unwrap();
        let b = run_experiment(&config, 4, None).unwrap();
        assert_eq!(a, b);
        assert!(a.submitted > 0);
        assert!(a.total_ticks >= config.arrival_ticks);
    }

    #[test]
    fn test_every_submitted_job_completes() {
        let report = run_experiment(&small_config(), 2, None).unwrap();
        let completed: u64 = report.averages.iter().map(|a| a.completed).sum();
        assert_eq!(completed as usize, report.submitted);
    }

    #[test]
    fn test_timeline_records_every_tick() {
        let mut timeline = Timeline::new();
        let report = run_experiment(&small_config(), 4, Some(&mut timeline)).unwrap();
        assert_eq!(timeline.len(), report.total_ticks);
    }

    #[test]
    fn test_zero_capacity_with_jobs_is_error() {
        assert!(run_experiment(&small_config(), 0, None).is_err());
    }

    #[test]
    fn test_no_arrivals_scores_zero() {
        let config = ExperimentConfig {
            arrival_ticks: 50,
            arrivals: ArrivalConfig {
                arrival_probability: 0.0,
                ..ArrivalConfig::default()
            },
            ..ExperimentConfig::default()
        };
        let report = run_experiment(&config, 3, None).unwrap();
        assert!(report.averages.is_empty());
        assert_eq!(report.score(), 0.0);
        assert_eq!(report.total_ticks, 50);
    }

    #[test]
    fn test_sweep_picks_lowest_score() {
        let result = sweep(&small_config(), 1, 6).unwrap();
        assert_eq!(result.reports.len(), 6);

        let min = result
            .reports
            .iter()
            .map(ExperimentReport::score)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_score, min);

        let first_best = result
            .reports
            .iter()
            .find(|r| r.score() == min)
            .map(|r| r.capacity);
        assert_eq!(Some(result.best_capacity), first_best);
    }

    #[test]
    fn test_sweep_rejects_bad_range() {
        assert!(sweep(&small_config(), 0, 3).is_err());
        assert!(sweep(&small_config(), 5, 3).is_err());
    }
}
