//! Benchmark support crate for graphsweep.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for the pruner and the two algorithm engines.

pub mod error;
pub mod params;
pub mod source;
