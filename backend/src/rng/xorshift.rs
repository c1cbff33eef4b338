//! xorshift64* random number generator
//!
//! Small, fast and reproducible: the same seed yields the same sequence on
//! every platform. Used to drive the workload generator and the fleet-size
//! sweep, where every capacity must see an identical arrival stream.

use serde::{Deserialize, Serialize};

/// Multiplier from Vigna's xorshift64* paper
const XORSHIFT_STAR_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use ambulance_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let duration = rng.range_inclusive(10, 20);
/// assert!((10..=20).contains(&duration));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed would lock xorshift at zero forever, so it is mapped to 1.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(XORSHIFT_STAR_MULTIPLIER)
    }

    /// Random value in `[min, max)`
    ///
    /// # Panics
    /// Panics if `min >= max`
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let span = max.abs_diff(min);
        min.wrapping_add((self.next() % span) as i64)
    }

    /// Random value in `[min, max]`
    ///
    /// # Panics
    /// Panics if `min > max`
    pub fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");

        if min == max {
            return min;
        }
        let span = max.abs_diff(min).saturating_add(1);
        min.wrapping_add((self.next() % span) as i64)
    }

    /// Random f64 in `[0.0, 1.0)` built from the top 53 bits
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with probability `p`
    ///
    /// Values of `p` at or below 0 never succeed; at or above 1 always do.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Current internal state, usable as a seed to resume the sequence
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
