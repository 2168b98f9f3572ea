//! JSON sweep configuration.
//!
//! The document lists inputs, output roots and algorithm names as parallel
//! arrays plus the shared sweep axes:
//!
//! ```json
//! {
//!   "inputs": ["data/roads.csv", "data/grid.matrix"],
//!   "outputs": ["out/roads", "out/grid"],
//!   "algorithms": ["dijkstra", "boruvka"],
//!   "repetitions": 5,
//!   "steps": [0, 50],
//!   "removal_percentages": [0, 10, 25],
//!   "source_node": 0
//! }
//! ```

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use graphsweep_core::{Algorithm, Experiment, ExperimentBuilder, ExperimentError, Orientation};
use graphsweep_providers_tabular::{GraphFormat, TabularGraphSource, TabularSourceError};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating a [`SweepConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config `{path}`: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The document is not valid JSON for a sweep configuration.
    #[error("failed to parse sweep config: {0}")]
    Parse(#[from] serde_json::Error),
    /// No inputs were listed.
    #[error("sweep config lists no inputs")]
    NoInputs,
    /// A parallel list does not match the length of `inputs`.
    #[error("`{field}` lists {found} entries but `inputs` lists {expected}")]
    LengthMismatch {
        /// Name of the mismatched list.
        field: &'static str,
        /// Number of inputs.
        expected: usize,
        /// Number of entries found.
        found: usize,
    },
    /// A sweep axis or algorithm name is invalid.
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
    /// An input path or format override is not usable.
    #[error(transparent)]
    Source(#[from] TabularSourceError),
}

const fn default_repetitions() -> usize {
    1
}

fn default_steps() -> Vec<usize> {
    vec![graphsweep_core::WHOLE_GRAPH_STEP]
}

fn default_removal_percentages() -> Vec<u8> {
    vec![0]
}

const fn default_directed() -> bool {
    true
}

/// Deserialised sweep configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Input graph files.
    pub inputs: Vec<PathBuf>,
    /// Output root per input.
    pub outputs: Vec<PathBuf>,
    /// Algorithm name per input.
    pub algorithms: Vec<String>,
    /// Trials per sweep point.
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Node-prefix sizes; `0` means the whole graph.
    #[serde(default = "default_steps")]
    pub steps: Vec<usize>,
    /// Edge removal percentages.
    #[serde(default = "default_removal_percentages")]
    pub removal_percentages: Vec<u8>,
    /// Source node for shortest-path inputs.
    #[serde(default)]
    pub source_node: usize,
    /// Whether shortest-path inputs are read as directed graphs.
    #[serde(default = "default_directed")]
    pub directed: bool,
    /// Optional format override per input; `null` entries use the extension.
    #[serde(default)]
    pub formats: Vec<Option<String>>,
}

/// One input paired with its algorithm and output root.
#[derive(Clone, Debug)]
pub struct SweepJob {
    /// File-backed graph source.
    pub source: TabularGraphSource,
    /// Algorithm timed on the source.
    pub algorithm: Algorithm,
    /// Directory receiving the results.
    pub output: PathBuf,
}

/// A fully validated sweep ready to execute.
#[derive(Clone, Debug)]
pub struct SweepPlan {
    /// Shared sweep axes.
    pub experiment: Experiment,
    /// Jobs in configuration order.
    pub jobs: Vec<SweepJob>,
}

impl SweepConfig {
    /// Reads and parses the configuration at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    ///
    /// # Examples
    /// ```
    /// use graphsweep_cli::config::SweepConfig;
    ///
    /// let config = SweepConfig::from_json(
    ///     r#"{"inputs": ["a.csv"], "outputs": ["out"], "algorithms": ["mst"]}"#,
    /// )?;
    /// assert_eq!(config.repetitions, 1);
    /// assert!(config.directed);
    /// # Ok::<(), graphsweep_cli::config::ConfigError>(())
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Orientation used when loading inputs for `algorithm`.
    ///
    /// Spanning trees are always computed on undirected graphs.
    #[must_use]
    pub const fn orientation_for(&self, algorithm: Algorithm) -> Orientation {
        match algorithm {
            Algorithm::SpanningTree => Orientation::Undirected,
            Algorithm::ShortestPath if self.directed => Orientation::Directed,
            Algorithm::ShortestPath => Orientation::Undirected,
        }
    }

    /// Validates every field and resolves sources and algorithms.
    ///
    /// Nothing is read from the inputs yet; this only rejects configurations
    /// that could never run. An input whose extension maps to no format is
    /// still planned: its points fail with `LOAD_UNSUPPORTED_FORMAT` while
    /// the other inputs run.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoInputs`], [`ConfigError::LengthMismatch`],
    /// [`ConfigError::Experiment`] for invalid axes or unknown algorithms, and
    /// [`ConfigError::Source`] for unknown format override names.
    pub fn plan(&self) -> Result<SweepPlan, ConfigError> {
        let expected = self.inputs.len();
        if expected == 0 {
            return Err(ConfigError::NoInputs);
        }
        check_length("outputs", expected, self.outputs.len())?;
        check_length("algorithms", expected, self.algorithms.len())?;
        if !self.formats.is_empty() {
            check_length("formats", expected, self.formats.len())?;
        }

        let experiment = ExperimentBuilder::new()
            .with_repetitions(self.repetitions)
            .with_steps(self.steps.iter().copied())
            .with_removal_percentages(self.removal_percentages.iter().copied())
            .with_source_node(self.source_node)
            .build()?;

        let mut jobs = Vec::with_capacity(expected);
        let rows = self.inputs.iter().zip(&self.outputs).zip(&self.algorithms);
        for (index, ((input, output), name)) in rows.enumerate() {
            let algorithm: Algorithm = name.parse()?;
            let orientation = self.orientation_for(algorithm);
            let source = match self.formats.get(index).and_then(Option::as_deref) {
                Some(name) => {
                    let format: GraphFormat = name.parse()?;
                    TabularGraphSource::with_format(input, format, orientation)
                }
                None => TabularGraphSource::new(input, orientation),
            };
            jobs.push(SweepJob {
                source,
                algorithm,
                output: output.clone(),
            });
        }
        Ok(SweepPlan { experiment, jobs })
    }
}

const fn check_length(field: &'static str, expected: usize, found: usize) -> Result<(), ConfigError> {
    if found == expected {
        Ok(())
    } else {
        Err(ConfigError::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use graphsweep_core::GraphSource;
    use rstest::rstest;

    fn base() -> SweepConfig {
        SweepConfig::from_json(
            r#"{
                "inputs": ["a.csv", "b.matrix"],
                "outputs": ["out/a", "out/b"],
                "algorithms": ["dijkstra", "boruvka"],
                "repetitions": 3,
                "steps": [0, 10],
                "removal_percentages": [0, 50],
                "source_node": 1
            }"#,
        )
        .expect("fixture config parses")
    }

    #[test]
    fn plan_resolves_jobs_in_order() {
        let plan = base().plan().expect("config is valid");
        assert_eq!(plan.experiment.repetitions().get(), 3);
        assert_eq!(plan.experiment.steps(), &[0, 10]);
        assert_eq!(plan.experiment.source_node(), 1);
        let summary: Vec<_> = plan
            .jobs
            .iter()
            .map(|job| (job.algorithm, job.source.format(), job.source.orientation()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Algorithm::ShortestPath, Some(GraphFormat::EdgeList), Orientation::Directed),
                (
                    Algorithm::SpanningTree,
                    Some(GraphFormat::AdjacencyMatrix),
                    Orientation::Undirected
                ),
            ]
        );
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config =
            SweepConfig::from_json(r#"{"inputs": [], "outputs": [], "algorithms": []}"#)
                .expect("minimal config parses");
        assert_eq!(config.steps, vec![0]);
        assert_eq!(config.removal_percentages, vec![0]);
        assert_eq!(config.source_node, 0);
        assert!(config.formats.is_empty());
        assert!(matches!(config.plan(), Err(ConfigError::NoInputs)));
    }

    #[test]
    fn undirected_shortest_path_inputs() {
        let mut config = base();
        config.directed = false;
        assert_eq!(
            config.orientation_for(Algorithm::ShortestPath),
            Orientation::Undirected
        );
    }

    #[test]
    fn format_overrides_replace_extension_detection() {
        let mut config = base();
        config.inputs[1] = PathBuf::from("b.data");
        config.formats = vec![None, Some("matrix".into())];
        let plan = config.plan().expect("override makes the input usable");
        assert_eq!(plan.jobs[1].source.format(), Some(GraphFormat::AdjacencyMatrix));
    }

    #[rstest]
    #[case::outputs("outputs")]
    #[case::algorithms("algorithms")]
    #[case::formats("formats")]
    fn mismatched_lists_are_rejected(#[case] field: &'static str) {
        let mut config = base();
        match field {
            "outputs" => {
                config.outputs.pop();
            }
            "algorithms" => config.algorithms.push("mst".into()),
            _ => config.formats = vec![None],
        }
        let err = config.plan().expect_err("lengths differ");
        assert!(matches!(err, ConfigError::LengthMismatch { field: found, .. } if found == field));
    }

    #[test]
    fn unknown_algorithm_fails_planning() {
        let mut config = base();
        config.algorithms[1] = "bellman-ford".into();
        let err = config.plan().expect_err("algorithm is unknown");
        assert!(matches!(
            err,
            ConfigError::Experiment(ExperimentError::UnknownAlgorithm { ref name }) if name == "bellman-ford"
        ));
    }

    #[rstest]
    #[case::zero_repetitions(r#""repetitions": 0"#)]
    #[case::empty_steps(r#""steps": []"#)]
    #[case::percent_too_large(r#""removal_percentages": [150]"#)]
    fn invalid_axes_fail_planning(#[case] field: &str) {
        let raw = format!(r#"{{"inputs": ["a.csv"], "outputs": ["o"], "algorithms": ["mst"], {field}}}"#);
        let config = SweepConfig::from_json(&raw).expect("config parses");
        assert!(matches!(config.plan(), Err(ConfigError::Experiment(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SweepConfig::from_json(
            r#"{"inputs": [], "outputs": [], "algorithms": [], "threads": 4}"#,
        )
        .expect_err("unknown field");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unsupported_input_extension_is_deferred_to_load() {
        let mut config = base();
        config.inputs[0] = PathBuf::from("a.parquet");
        let plan = config.plan().expect("extensions are checked when loading");
        assert_eq!(plan.jobs.len(), 2);
        assert_eq!(plan.jobs[0].source.format(), None);
        let err = plan.jobs[0].source.load().expect_err("parquet has no reader");
        assert_eq!(err.code().as_str(), "LOAD_UNSUPPORTED_FORMAT");
        assert_eq!(plan.jobs[1].source.format(), Some(GraphFormat::AdjacencyMatrix));
    }

    #[test]
    fn unknown_format_override_fails_planning() {
        let mut config = base();
        config.formats = vec![Some("parquet".into()), None];
        assert!(matches!(
            config.plan(),
            Err(ConfigError::Source(TabularSourceError::UnknownFormatName { ref name })) if name == "parquet"
        ));
    }
}
