//! Per-point results handed to a [`ResultSink`](super::ResultSink).

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    prune::{PruneError, RemovalPercent},
    shortest_path::{ShortestPathError, ShortestPaths},
    source::LoadError,
    spanning_tree::{SpanningTree, SpanningTreeError},
};

use super::Algorithm;

/// Coordinates of one sweep point.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SweepPoint {
    input: Arc<str>,
    algorithm: Algorithm,
    step: usize,
    removal: RemovalPercent,
}

impl SweepPoint {
    /// Creates a sweep point.
    #[must_use]
    pub fn new(
        input: impl Into<Arc<str>>,
        algorithm: Algorithm,
        step: usize,
        removal: RemovalPercent,
    ) -> Self {
        Self {
            input: input.into(),
            algorithm,
            step,
            removal,
        }
    }

    /// Returns the input identifier.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the algorithm timed at this point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Returns the step size; `0` stands for the whole graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn step(&self) -> usize { self.step }

    /// Returns the requested removal percentage.
    #[must_use]
    #[rustfmt::skip]
    pub const fn removal(&self) -> RemovalPercent { self.removal }
}

impl fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input `{}` algorithm {} step {} removal {}",
            self.input, self.algorithm, self.step, self.removal
        )
    }
}

/// Output of one trial.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TrialPayload {
    /// Distances and paths from the source node.
    ShortestPaths(ShortestPaths),
    /// Minimum spanning tree edges.
    SpanningTree(SpanningTree),
}

/// One timed algorithm invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trial {
    repetition: usize,
    payload: TrialPayload,
    elapsed: Duration,
}

impl Trial {
    pub(crate) const fn new(repetition: usize, payload: TrialPayload, elapsed: Duration) -> Self {
        Self {
            repetition,
            payload,
            elapsed,
        }
    }

    /// Returns the 1-based repetition number.
    #[must_use]
    #[rustfmt::skip]
    pub const fn repetition(&self) -> usize { self.repetition }

    /// Returns the algorithm output.
    #[must_use]
    #[rustfmt::skip]
    pub const fn payload(&self) -> &TrialPayload { &self.payload }

    /// Returns the wall-clock time of the invocation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn elapsed(&self) -> Duration { self.elapsed }
}

/// Trials of a completed sweep point plus the shape of the graph they ran on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrialSet {
    trials: Vec<Trial>,
    node_count: usize,
    edge_count: usize,
    removed_edges: usize,
}

impl TrialSet {
    pub(crate) const fn new(
        trials: Vec<Trial>,
        node_count: usize,
        edge_count: usize,
        removed_edges: usize,
    ) -> Self {
        Self {
            trials,
            node_count,
            edge_count,
            removed_edges,
        }
    }

    /// Returns the trials in repetition order.
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// Iterates the per-trial elapsed times in repetition order.
    pub fn elapsed_times(&self) -> impl Iterator<Item = Duration> + '_ {
        self.trials.iter().map(Trial::elapsed)
    }

    /// Returns the summed elapsed time of all trials.
    #[must_use]
    pub fn total_elapsed(&self) -> Duration {
        self.elapsed_times().sum()
    }

    /// Returns the mean elapsed time, truncated to whole nanoseconds.
    #[must_use]
    pub fn average_elapsed(&self) -> Duration {
        let count = self.trials.len().max(1) as u128;
        let nanos = self.total_elapsed().as_nanos() / count;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Returns the node count of the pruned graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the edge count of the pruned graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Returns how many edges pruning removed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn removed_edges(&self) -> usize { self.removed_edges }
}

/// Failure category of a sweep point.
#[non_exhaustive]
#[derive(Clone, Debug, Error)]
pub enum PointFailure {
    /// The input could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Directed pruning could not keep the graph strongly connected.
    #[error(transparent)]
    Prune(#[from] PruneError),
    /// The shortest-path engine rejected the graph or source.
    #[error(transparent)]
    ShortestPath(#[from] ShortestPathError),
    /// The spanning-tree engine rejected the graph.
    #[error(transparent)]
    SpanningTree(#[from] SpanningTreeError),
}

impl PointFailure {
    /// Returns the stable code of the underlying error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Load(error) => error.code().as_str(),
            Self::Prune(error) => error.code().as_str(),
            Self::ShortestPath(error) => error.code().as_str(),
            Self::SpanningTree(error) => error.code().as_str(),
        }
    }
}

/// A failed sweep point with the coordinates needed to reproduce it.
#[derive(Clone, Debug, Error)]
#[error("{point}: {kind}")]
pub struct SweepPointError {
    point: SweepPoint,
    #[source]
    kind: PointFailure,
}

impl SweepPointError {
    pub(crate) fn new(point: SweepPoint, kind: impl Into<PointFailure>) -> Self {
        Self {
            point,
            kind: kind.into(),
        }
    }

    /// Returns the failing sweep point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn point(&self) -> &SweepPoint { &self.point }

    /// Returns the failure category.
    #[must_use]
    #[rustfmt::skip]
    pub const fn kind(&self) -> &PointFailure { &self.kind }

    /// Returns the stable code of the underlying error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// How a sweep point ended.
#[derive(Clone, Debug)]
pub enum PointOutcome {
    /// All repetitions ran.
    Completed(TrialSet),
    /// Undirected pruning could not keep the graph connected.
    Skipped(PruneError),
    /// Loading, directed pruning or an algorithm failed.
    Failed(SweepPointError),
}

/// Result of one sweep point.
#[derive(Clone, Debug)]
pub struct SweepPointReport {
    point: SweepPoint,
    outcome: PointOutcome,
}

impl SweepPointReport {
    pub(crate) const fn new(point: SweepPoint, outcome: PointOutcome) -> Self {
        Self { point, outcome }
    }

    /// Returns the sweep point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn point(&self) -> &SweepPoint { &self.point }

    /// Returns the outcome.
    #[must_use]
    #[rustfmt::skip]
    pub const fn outcome(&self) -> &PointOutcome { &self.outcome }

    /// Returns the trials when the point completed.
    #[must_use]
    pub const fn trials(&self) -> Option<&TrialSet> {
        match &self.outcome {
            PointOutcome::Completed(trials) => Some(trials),
            PointOutcome::Skipped(_) | PointOutcome::Failed(_) => None,
        }
    }
}

/// Outcome counts of a finished sweep.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SweepSummary {
    completed: usize,
    skipped: usize,
    failed: usize,
}

impl SweepSummary {
    pub(crate) const fn count(&mut self, outcome: &PointOutcome) {
        match outcome {
            PointOutcome::Completed(_) => self.completed += 1,
            PointOutcome::Skipped(_) => self.skipped += 1,
            PointOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Returns the number of completed points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn completed(&self) -> usize { self.completed }

    /// Returns the number of skipped points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn skipped(&self) -> usize { self.skipped }

    /// Returns the number of failed points.
    #[must_use]
    #[rustfmt::skip]
    pub const fn failed(&self) -> usize { self.failed }

    /// Returns the number of points visited.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.completed + self.skipped + self.failed
    }
}
