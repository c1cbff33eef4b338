//! Workload generation for deterministic job creation.
//!
//! Produces at most one call-out per tick with a configured probability,
//! drawing its duration and priority from configured distributions. All
//! randomness comes from the caller's `RngManager`, so a seed fully
//! determines the workload.
//!
//! # Example
//!
//! ```
//! use ambulance_simulator_core_rs::arrivals::{ArrivalConfig, PriorityDistribution, WorkloadGenerator};
//! use ambulance_simulator_core_rs::rng::RngManager;
//!
//! let config = ArrivalConfig {
//!     arrival_probability: 0.5,
//!     duration_range: (10, 20),
//!     priority_distribution: PriorityDistribution::Uniform { min: 1, max: 4 },
//! };
//! let generator = WorkloadGenerator::new(config).unwrap();
//! let mut rng = RngManager::new(42);
//!
//! let jobs: Vec<_> = (0..100).filter_map(|t| generator.next_job(t, &mut rng)).collect();
//! assert!(jobs.iter().all(|j| (10..=20).contains(&j.duration())));
//! ```

use crate::models::job::{Job, Priority};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Priority distribution for generated jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PriorityDistribution {
    /// Every job gets the same priority
    Fixed { value: Priority },

    /// Discrete values with relative weights
    Categorical {
        values: Vec<Priority>,
        weights: Vec<f64>,
    },

    /// Uniform integer in `[min, max]`
    Uniform { min: Priority, max: Priority },
}

impl Default for PriorityDistribution {
    fn default() -> Self {
        PriorityDistribution::Uniform { min: 1, max: 4 }
    }
}

/// Workload parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Probability that a job arrives on a given tick, in `[0, 1]`
    pub arrival_probability: f64,

    /// Inclusive job duration range in ticks (min, max); min must be >= 1
    pub duration_range: (i64, i64),

    /// Priority distribution for generated jobs
    #[serde(default)]
    pub priority_distribution: PriorityDistribution,
}

impl Default for ArrivalConfig {
    /// One arrival every three ticks on average, 10 to 20 ticks long
    fn default() -> Self {
        Self {
            arrival_probability: 1.0 / 3.0,
            duration_range: (10, 20),
            priority_distribution: PriorityDistribution::default(),
        }
    }
}

impl ArrivalConfig {
    /// Check parameters so sampling never has to fall back
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(0.0..=1.0).contains(&self.arrival_probability) {
            return Err(SimulationError::InvalidConfig(format!(
                "arrival_probability must be in [0, 1], got {}",
                self.arrival_probability
            )));
        }

        let (min, max) = self.duration_range;
        if min < 1 || min > max {
            return Err(SimulationError::InvalidConfig(format!(
                "duration_range must satisfy 1 <= min <= max, got ({}, {})",
                min, max
            )));
        }

        match &self.priority_distribution {
            PriorityDistribution::Fixed { .. } => {}
            PriorityDistribution::Uniform { min, max } => {
                if min > max {
                    return Err(SimulationError::InvalidConfig(format!(
                        "priority range min {} exceeds max {}",
                        min, max
                    )));
                }
            }
            PriorityDistribution::Categorical { values, weights } => {
                if values.is_empty() || values.len() != weights.len() {
                    return Err(SimulationError::InvalidConfig(
                        "categorical priorities need one weight per value".to_string(),
                    ));
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0)
                    || weights.iter().sum::<f64>() <= 0.0
                {
                    return Err(SimulationError::InvalidConfig(
                        "categorical weights must be non-negative with a positive sum"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Generator for job arrivals.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: ArrivalConfig,
}

impl WorkloadGenerator {
    /// Create a generator after validating its configuration.
    pub fn new(config: ArrivalConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ArrivalConfig {
        &self.config
    }

    /// Possibly generate a job arriving at `tick`.
    ///
    /// The job ID is the arrival tick, which is unique because at most one
    /// job arrives per tick.
    pub fn next_job(&self, tick: usize, rng: &mut RngManager) -> Option<Job> {
        if !rng.chance(self.config.arrival_probability) {
            return None;
        }

        let priority = self.sample_priority(rng);
        let (min, max) = self.config.duration_range;
        let duration = rng.range_inclusive(min, max);

        // duration >= 1 is guaranteed by validate()
        Job::new(tick as u64, priority, duration).ok()
    }

    fn sample_priority(&self, rng: &mut RngManager) -> Priority {
        match &self.config.priority_distribution {
            PriorityDistribution::Fixed { value } => *value,
            PriorityDistribution::Uniform { min, max } => {
                rng.range_inclusive(i64::from(*min), i64::from(*max)) as Priority
            }
            PriorityDistribution::Categorical { values, weights } => {
                Self::sample_categorical(values, weights, rng)
            }
        }
    }

    /// Weighted selection; inputs are validated non-empty and equal length.
    fn sample_categorical(values: &[Priority], weights: &[f64], rng: &mut RngManager) -> Priority {
        let total_weight: f64 = weights.iter().sum();
        let mut target = rng.next_f64() * total_weight;

        for (value, weight) in values.iter().zip(weights) {
            target -= weight;
            if target < 0.0 {
                return *value;
            }
        }

        // Floating-point residue lands on the last positive-weight value
        values
            .iter()
            .zip(weights)
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(v, _)| *v)
            .unwrap_or(values[0])
    }
}
