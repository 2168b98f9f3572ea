//! Validated construction of [`Experiment`] instances.

use std::num::NonZeroUsize;

use crate::prune::RemovalPercent;

use super::{Experiment, ExperimentError, WHOLE_GRAPH_STEP};

/// Configures and constructs [`Experiment`] instances.
///
/// Defaults to one repetition over the whole graph without pruning, using
/// node `0` as the shortest-path source.
///
/// # Examples
/// ```
/// use graphsweep_core::ExperimentBuilder;
///
/// let experiment = ExperimentBuilder::new()
///     .with_repetitions(3)
///     .with_steps([10, 20])
///     .with_removal_percentages([0, 25])
///     .build()?;
/// assert_eq!(experiment.repetitions().get(), 3);
/// assert_eq!(experiment.points_per_input(), 4);
/// # Ok::<(), graphsweep_core::ExperimentError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExperimentBuilder {
    repetitions: usize,
    steps: Vec<usize>,
    removal_percentages: Vec<u8>,
    source_node: usize,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            repetitions: 1,
            steps: vec![WHOLE_GRAPH_STEP],
            removal_percentages: vec![0],
            source_node: 0,
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many timed trials run per sweep point.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Sets the step sizes; [`WHOLE_GRAPH_STEP`] keeps the whole graph.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = usize>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Sets the edge-removal percentages.
    #[must_use]
    pub fn with_removal_percentages(mut self, percentages: impl IntoIterator<Item = u8>) -> Self {
        self.removal_percentages = percentages.into_iter().collect();
        self
    }

    /// Sets the shortest-path source node.
    #[must_use]
    pub fn with_source_node(mut self, node: usize) -> Self {
        self.source_node = node;
        self
    }

    /// Returns the configured repetition count.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Returns the configured step sizes.
    #[must_use]
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Returns the configured removal percentages.
    #[must_use]
    pub fn removal_percentages(&self) -> &[u8] {
        &self.removal_percentages
    }

    /// Returns the configured shortest-path source node.
    #[must_use]
    pub fn source_node(&self) -> usize {
        self.source_node
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`ExperimentError::InvalidRepetitions`] for zero repetitions,
    /// [`ExperimentError::EmptySweep`] when an axis has no values and
    /// [`ExperimentError::InvalidRemovalPercent`] for a percentage above 100.
    pub fn build(self) -> Result<Experiment, ExperimentError> {
        let repetitions =
            NonZeroUsize::new(self.repetitions).ok_or(ExperimentError::InvalidRepetitions {
                got: self.repetitions,
            })?;
        if self.steps.is_empty() {
            return Err(ExperimentError::EmptySweep { axis: "steps" });
        }
        if self.removal_percentages.is_empty() {
            return Err(ExperimentError::EmptySweep {
                axis: "removal_percentages",
            });
        }
        let removal_percentages = self
            .removal_percentages
            .iter()
            .map(|&got| {
                RemovalPercent::new(got).map_err(|_| ExperimentError::InvalidRemovalPercent { got })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Experiment::new(
            repetitions,
            self.steps,
            removal_percentages,
            self.source_node,
        ))
    }
}
