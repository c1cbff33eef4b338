//! Deterministic random number generation
//!
//! Workload generation draws every random value through `RngManager` so that a
//! seed fully determines the arrival stream.

mod xorshift;

pub use xorshift::RngManager;
