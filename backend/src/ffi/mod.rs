//! Python bindings (enabled with the `pyo3` feature)
//!
//! Thin wrapper: every call forwards to the Rust `Simulator` and converts
//! results at the boundary.

pub mod simulator;
pub mod types;
