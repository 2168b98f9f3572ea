//! Parameter sweep over inputs, step sizes and removal percentages.
//!
//! For every sweep point the runner loads the input afresh, restricts it to
//! the requested step, prunes it, and times `repetitions` runs of the
//! input's algorithm. Each point produces one [`SweepPointReport`] handed to
//! a [`ResultSink`]. Data problems only affect their own point; a sink
//! failure aborts the sweep.

mod algorithm;
mod builder;
mod report;
mod runner;
mod sink;

use std::error::Error as StdError;

use thiserror::Error;

use crate::error::define_error_codes;

pub use self::{
    algorithm::Algorithm,
    builder::ExperimentBuilder,
    report::{
        PointFailure, PointOutcome, SweepPoint, SweepPointError, SweepPointReport, SweepSummary,
        Trial, TrialPayload, TrialSet,
    },
    runner::{Experiment, ExperimentInput},
    sink::ResultSink,
};

/// Step size meaning "do not restrict the graph".
pub const WHOLE_GRAPH_STEP: usize = 0;

/// Errors that abort an experiment as a whole.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// Repetitions must be at least one.
    #[error("repetitions must be at least 1 (got {got})")]
    InvalidRepetitions {
        /// Provided repetition count.
        got: usize,
    },
    /// A sweep axis was configured without values.
    #[error("sweep axis `{axis}` has no values")]
    EmptySweep {
        /// Name of the empty axis.
        axis: &'static str,
    },
    /// A removal percentage exceeded 100.
    #[error("removal percentage must be within 0..=100 (got {got})")]
    InvalidRemovalPercent {
        /// Provided percentage.
        got: u8,
    },
    /// An algorithm name did not match any implemented engine.
    #[error("unknown algorithm `{name}`")]
    UnknownAlgorithm {
        /// The unrecognised name.
        name: String,
    },
    /// The result sink rejected a report.
    #[error("result sink failed: {error}")]
    Sink {
        /// Underlying sink failure.
        #[source]
        error: Box<dyn StdError + Send + Sync>,
    },
}

define_error_codes! {
    /// Stable codes describing [`ExperimentError`] variants.
    enum ExperimentErrorCode for ExperimentError {
        /// Repetitions must be at least one.
        InvalidRepetitions => InvalidRepetitions { .. } => "EXPERIMENT_INVALID_REPETITIONS",
        /// A sweep axis had no values.
        EmptySweep => EmptySweep { .. } => "EXPERIMENT_EMPTY_SWEEP",
        /// A removal percentage exceeded 100.
        InvalidRemovalPercent => InvalidRemovalPercent { .. } => "EXPERIMENT_INVALID_REMOVAL_PERCENT",
        /// An algorithm name was not recognised.
        UnknownAlgorithm => UnknownAlgorithm { .. } => "EXPERIMENT_UNKNOWN_ALGORITHM",
        /// The result sink failed.
        Sink => Sink { .. } => "EXPERIMENT_SINK",
    }
}
