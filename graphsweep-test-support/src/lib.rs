//! Shared test utilities used across graphsweep crates.

pub mod proptest_profile;
pub mod tracing;
