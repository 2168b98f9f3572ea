//! Sweep execution.

use std::{num::NonZeroUsize, time::Instant};

use tracing::{error, info, instrument, warn};

use crate::{
    graph::{Graph, Orientation},
    prune::{RemovalPercent, prune},
    shortest_path::shortest_paths,
    source::GraphSource,
    spanning_tree::minimum_spanning_tree,
};

use super::{
    Algorithm, ExperimentError, PointFailure, PointOutcome, ResultSink, SweepPoint,
    SweepPointError, SweepPointReport, SweepSummary, Trial, TrialPayload, TrialSet,
    WHOLE_GRAPH_STEP,
};

/// A graph source paired with the algorithm to time on it.
#[derive(Clone, Copy)]
pub struct ExperimentInput<'a> {
    source: &'a dyn GraphSource,
    algorithm: Algorithm,
}

impl<'a> ExperimentInput<'a> {
    /// Pairs `source` with `algorithm`.
    #[must_use]
    pub const fn new(source: &'a dyn GraphSource, algorithm: Algorithm) -> Self {
        Self { source, algorithm }
    }

    /// Pairs `source` with the algorithm called `name`.
    ///
    /// # Errors
    /// Returns [`ExperimentError::UnknownAlgorithm`] when `name` is not
    /// recognised.
    pub fn parse(source: &'a dyn GraphSource, name: &str) -> Result<Self, ExperimentError> {
        Ok(Self::new(source, name.parse()?))
    }

    /// Returns the graph source.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> &'a dyn GraphSource { self.source }

    /// Returns the algorithm.
    #[must_use]
    #[rustfmt::skip]
    pub const fn algorithm(&self) -> Algorithm { self.algorithm }
}

/// A validated sweep configuration.
///
/// Built with [`ExperimentBuilder`](super::ExperimentBuilder).
///
/// # Examples
/// ```
/// use graphsweep_core::{
///     Algorithm, Edge, ExperimentBuilder, ExperimentInput, Graph, Orientation, StaticGraphSource,
///     SweepPointReport,
/// };
///
/// let graph = Graph::from_edges(
///     Orientation::Undirected,
///     [Edge::new(0, 1, 1), Edge::new(1, 2, 2), Edge::new(0, 2, 3)],
/// )?;
/// let source = StaticGraphSource::new("triangle", graph);
/// let experiment = ExperimentBuilder::new().with_repetitions(2).build()?;
///
/// let mut reports: Vec<SweepPointReport> = Vec::new();
/// let summary = experiment.run(
///     &[ExperimentInput::new(&source, Algorithm::SpanningTree)],
///     &mut reports,
/// )?;
/// assert_eq!(summary.completed(), 1);
/// assert_eq!(reports[0].trials().map(|set| set.trials().len()), Some(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Experiment {
    repetitions: NonZeroUsize,
    steps: Vec<usize>,
    removal_percentages: Vec<RemovalPercent>,
    source_node: usize,
}

impl Experiment {
    pub(crate) const fn new(
        repetitions: NonZeroUsize,
        steps: Vec<usize>,
        removal_percentages: Vec<RemovalPercent>,
        source_node: usize,
    ) -> Self {
        Self {
            repetitions,
            steps,
            removal_percentages,
            source_node,
        }
    }

    /// Returns the number of trials per sweep point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn repetitions(&self) -> NonZeroUsize { self.repetitions }

    /// Returns the step sizes.
    #[must_use]
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Returns the removal percentages.
    #[must_use]
    pub fn removal_percentages(&self) -> &[RemovalPercent] {
        &self.removal_percentages
    }

    /// Returns the shortest-path source node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source_node(&self) -> usize { self.source_node }

    /// Returns how many sweep points each input contributes.
    #[must_use]
    pub fn points_per_input(&self) -> usize {
        self.steps.len() * self.removal_percentages.len()
    }

    /// Runs every sweep point of every input, in input, step, removal order,
    /// and forwards each report to `sink`.
    ///
    /// Failed and skipped points are reported and the sweep continues.
    ///
    /// # Errors
    /// Returns [`ExperimentError::Sink`] when the sink rejects a report or
    /// fails to finish.
    #[instrument(
        name = "core.experiment",
        err,
        skip(self, inputs, sink),
        fields(
            inputs = inputs.len(),
            points = inputs.len() * self.points_per_input(),
            repetitions = self.repetitions.get(),
        ),
    )]
    pub fn run<S: ResultSink>(
        &self,
        inputs: &[ExperimentInput<'_>],
        sink: &mut S,
    ) -> Result<SweepSummary, ExperimentError> {
        let mut summary = SweepSummary::default();
        for input in inputs {
            for &step in &self.steps {
                for &removal in &self.removal_percentages {
                    let point =
                        SweepPoint::new(input.source.name(), input.algorithm, step, removal);
                    let report = self.run_point(input, point);
                    summary.count(report.outcome());
                    sink.record(&report).map_err(sink_error)?;
                }
            }
        }
        sink.finish(&summary).map_err(sink_error)?;
        info!(
            completed = summary.completed(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "sweep finished"
        );
        Ok(summary)
    }

    /// Runs a single sweep point: load, restrict, prune, then time
    /// `repetitions` trials.
    #[instrument(
        name = "core.sweep_point",
        skip(self, input, point),
        fields(
            input = %point.input(),
            algorithm = %point.algorithm(),
            step = point.step(),
            removal = point.removal().get(),
        ),
    )]
    pub fn run_point(&self, input: &ExperimentInput<'_>, point: SweepPoint) -> SweepPointReport {
        let outcome = match self.execute(input, &point) {
            Ok(trials) => {
                info!(
                    nodes = trials.node_count(),
                    edges = trials.edge_count(),
                    removed = trials.removed_edges(),
                    average_ns = trials.average_elapsed().as_nanos() as u64,
                    "sweep point completed"
                );
                PointOutcome::Completed(trials)
            }
            Err(PointFailure::Prune(reason)) if reason.is_skippable() => {
                warn!(code = reason.code().as_str(), reason = %reason, "sweep point skipped");
                PointOutcome::Skipped(reason)
            }
            Err(failure) => {
                let failure = SweepPointError::new(point.clone(), failure);
                error!(code = failure.code(), error = %failure, "sweep point failed");
                PointOutcome::Failed(failure)
            }
        };
        SweepPointReport::new(point, outcome)
    }

    fn execute(
        &self,
        input: &ExperimentInput<'_>,
        point: &SweepPoint,
    ) -> Result<TrialSet, PointFailure> {
        let mut graph = input.source.load()?;
        if point.step() != WHOLE_GRAPH_STEP {
            graph = graph.restrict_to(point.step());
        }
        if point.algorithm() == Algorithm::SpanningTree
            && graph.orientation() == Orientation::Directed
        {
            graph = graph.into_undirected();
        }

        let pruned = prune(&graph, point.removal())?;
        let removed = pruned.removed();
        let graph = pruned.into_graph();

        let mut trials = Vec::with_capacity(self.repetitions.get());
        for repetition in 1..=self.repetitions.get() {
            let started = Instant::now();
            let payload = self.trial(point.algorithm(), &graph)?;
            let elapsed = started.elapsed();
            trials.push(Trial::new(repetition, payload, elapsed));
        }
        Ok(TrialSet::new(
            trials,
            graph.node_count(),
            graph.edge_count(),
            removed,
        ))
    }

    fn trial(&self, algorithm: Algorithm, graph: &Graph) -> Result<TrialPayload, PointFailure> {
        Ok(match algorithm {
            Algorithm::ShortestPath => {
                TrialPayload::ShortestPaths(shortest_paths(graph, self.source_node)?)
            }
            Algorithm::SpanningTree => TrialPayload::SpanningTree(minimum_spanning_tree(graph)?),
        })
    }
}

fn sink_error<E: std::error::Error + Send + Sync + 'static>(error: E) -> ExperimentError {
    ExperimentError::Sink {
        error: Box::new(error),
    }
}
