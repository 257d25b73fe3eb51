//! # Configen Bench
//!
//! Benchmarking utilities for configen: synthetic schemas of configurable
//! shape and timing helpers.

pub mod schemas;
pub mod timing;
