//! Support library for the graphsweep CLI binary.
//!
//! Exposes the command pipeline, configuration, result sink and logging setup
//! so tests can exercise them without spawning a subprocess.

pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod sink;
