//! Command-line interface orchestration for graphsweep.
//!
//! `sweep` runs a JSON-configured parameter sweep into output directories,
//! `run` times a single sweep point and prints it, and `generate` writes a
//! random connected graph to disk.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GeneratedGraph, JobSummary,
    RunCommand, SweepCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
