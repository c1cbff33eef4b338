//! Experiment configuration
//!
//! An experiment is described by a JSON file passed with `--config`. Every
//! field has a default, so an empty object (or no file at all) reproduces the
//! baseline run: four ambulances, 10000 ticks of arrivals, one call-out every
//! three ticks on average.

use ambulance_simulator_core_rs::{ArrivalConfig, DEFAULT_CAPACITY};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level experiment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Seed for the workload generator
    pub seed: u64,

    /// Number of ticks during which new jobs may arrive
    pub arrival_ticks: usize,

    /// Fleet size for `run`
    pub capacity: i64,

    pub arrivals: ArrivalConfig,

    /// Print one timeline line per tick
    pub show_timeline: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            arrival_ticks: 10_000,
            capacity: DEFAULT_CAPACITY,
            arrivals: ArrivalConfig::default(),
            show_timeline: false,
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ExperimentConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity < 0 {
            bail!("capacity must be >= 0, got {}", self.capacity);
        }
        self.arrivals
            .validate()
            .context("Invalid arrivals configuration")?;
        Ok(())
    }
}
