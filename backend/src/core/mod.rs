//! Core simulation primitives

pub mod time;
