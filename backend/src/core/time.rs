//! Time management for the simulation
//!
//! The simulation advances in discrete ticks. The clock starts at tick 0 and
//! moves forward by exactly one tick per call to `Simulator::tick`.

use serde::{Deserialize, Serialize};

/// Discrete tick clock owned by the simulator
///
/// # Example
/// ```
/// use ambulance_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_tick(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
}

impl TimeManager {
    /// Create a clock positioned at tick 0
    pub fn new() -> Self {
        Self { current_tick: 0 }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (number of completed `advance_tick` calls)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_new() {
        assert_eq!(TimeManager::default(), TimeManager::new());
    }
}
