//! Command implementations and argument parsing for the graphsweep CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use graphsweep_core::{
    Algorithm, ExperimentBuilder, ExperimentError, ExperimentInput, GraphSource, Orientation,
    PointOutcome, RemovalPercent, SweepPoint, SweepPointError, SweepPointReport, SweepSummary,
    WHOLE_GRAPH_STEP,
    synthetic::{SyntheticError, SyntheticGraphConfig, generate},
};
use graphsweep_providers_tabular::{GraphFormat, TabularGraphSource, TabularSourceError, write_graph};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::{
    config::{ConfigError, SweepConfig},
    render::write_report,
    sink::{DirectorySink, SinkError},
};

const DEFAULT_MAX_WEIGHT: u64 = 100;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphsweep",
    about = "Time shortest-path and spanning-tree algorithms across pruning sweeps."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the sweep described by a JSON configuration file.
    Sweep(SweepCommand),
    /// Time one sweep point and print its results.
    Run(RunCommand),
    /// Write a random connected graph.
    Generate(GenerateCommand),
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Path to the JSON sweep configuration.
    #[arg(long)]
    pub config: PathBuf,
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Graph file (edge list or adjacency matrix).
    pub path: PathBuf,

    /// Algorithm to time: `dijkstra` or `boruvka` (and their aliases).
    #[arg(long)]
    pub algorithm: String,

    /// Source node for shortest paths.
    #[arg(long, default_value_t = 0)]
    pub source: usize,

    /// Percentage of edges to prune before timing.
    #[arg(long, default_value_t = 0)]
    pub removal: u8,

    /// Restrict the graph to nodes `0..step`; `0` keeps the whole graph.
    #[arg(long, default_value_t = WHOLE_GRAPH_STEP)]
    pub step: usize,

    /// Number of timed trials.
    #[arg(long, default_value_t = 1)]
    pub repetitions: usize,

    /// Read the graph as undirected.
    #[arg(long)]
    pub undirected: bool,

    /// Override the format detected from the extension.
    #[arg(long)]
    pub format: Option<String>,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Destination file; its extension selects the format unless
    /// `--format` is given.
    pub path: PathBuf,

    /// Number of nodes.
    #[arg(long)]
    pub nodes: usize,

    /// Edges added on top of the spanning skeleton.
    #[arg(long = "extra-edges", default_value_t = 0)]
    pub extra_edges: usize,

    /// Random seed.
    #[arg(long)]
    pub seed: u64,

    /// Largest edge weight.
    #[arg(long = "max-weight", default_value_t = DEFAULT_MAX_WEIGHT)]
    pub max_weight: u64,

    /// Output format: `edge-list` or `adjacency-matrix`.
    #[arg(long)]
    pub format: Option<String>,

    /// Generate a strongly connected directed graph.
    #[arg(long)]
    pub directed: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The sweep configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Experiment construction or execution failed.
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
    /// An input path or format name is unusable.
    #[error(transparent)]
    Source(#[from] TabularSourceError),
    /// An output directory could not be prepared.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// Random graph generation was misconfigured.
    #[error(transparent)]
    Synthetic(#[from] SyntheticError),
    /// The single sweep point of `run` failed.
    #[error(transparent)]
    Point(Box<SweepPointError>),
    /// Writing a generated graph failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Returns the stable code of the underlying core error, when it has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Config(ConfigError::Experiment(error)) | Self::Experiment(error) => {
                Some(error.code().as_str())
            }
            Self::Point(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Totals of one configured input.
#[derive(Debug, Clone)]
pub struct JobSummary {
    /// Input identifier.
    pub input: String,
    /// Algorithm timed on the input.
    pub algorithm: Algorithm,
    /// Output root.
    pub output: PathBuf,
    /// Outcome counts.
    pub summary: SweepSummary,
}

/// A graph written by `generate`.
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    /// Destination file.
    pub path: PathBuf,
    /// Format written.
    pub format: GraphFormat,
    /// Nodes in the graph.
    pub nodes: usize,
    /// Edges in the graph.
    pub edges: usize,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Per-input totals of a sweep.
    Sweep(Vec<JobSummary>),
    /// The report of a single sweep point.
    Run(Box<SweepPointReport>),
    /// A generated graph.
    Generate(GeneratedGraph),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when validation or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphsweep_cli::cli::{Cli, Command, ExecutionSummary, RunCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let path = dir.path().join("triangle.csv");
/// std::fs::write(&path, "0,1,1\n1,2,2\n0,2,3\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path,
///         algorithm: "mst".into(),
///         source: 0,
///         removal: 0,
///         step: 0,
///         repetitions: 2,
///         undirected: true,
///         format: None,
///     }),
/// };
/// let ExecutionSummary::Run(report) = run_cli(cli)? else { unreachable!() };
/// assert_eq!(report.trials().map(|set| set.trials().len()), Some(2));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Sweep(sweep) => {
            span.record("command", field::display("sweep"));
            run_sweep(&sweep)
        }
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_point(&run)
        }
        Command::Generate(generate) => {
            span.record("command", field::display("generate"));
            run_generate(&generate)
        }
    }
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(config = %command.config.display(), jobs = field::Empty),
)]
pub(super) fn run_sweep(command: &SweepCommand) -> Result<ExecutionSummary, CliError> {
    let config = SweepConfig::load(&command.config)?;
    let plan = config.plan()?;
    Span::current().record("jobs", plan.jobs.len());

    let mut totals = Vec::with_capacity(plan.jobs.len());
    for job in &plan.jobs {
        let mut sink = DirectorySink::create(&job.output)?;
        let inputs = [ExperimentInput::new(&job.source, job.algorithm)];
        let summary = plan.experiment.run(&inputs, &mut sink)?;
        totals.push(JobSummary {
            input: job.source.name().to_owned(),
            algorithm: job.algorithm,
            output: job.output.clone(),
            summary,
        });
    }
    info!(jobs = totals.len(), "sweep command completed");
    Ok(ExecutionSummary::Sweep(totals))
}

#[instrument(
    name = "cli.run_point",
    err,
    skip(command),
    fields(path = %command.path.display(), algorithm = %command.algorithm),
)]
pub(super) fn run_point(command: &RunCommand) -> Result<ExecutionSummary, CliError> {
    let algorithm: Algorithm = command.algorithm.parse()?;
    let orientation = if command.undirected || algorithm == Algorithm::SpanningTree {
        Orientation::Undirected
    } else {
        Orientation::Directed
    };
    let source = open_source(&command.path, command.format.as_deref(), orientation)?;
    let removal = RemovalPercent::new(command.removal).map_err(|_| {
        ExperimentError::InvalidRemovalPercent {
            got: command.removal,
        }
    })?;
    let experiment = ExperimentBuilder::new()
        .with_repetitions(command.repetitions)
        .with_steps([command.step])
        .with_removal_percentages([command.removal])
        .with_source_node(command.source)
        .build()?;

    let input = ExperimentInput::new(&source, algorithm);
    let point = SweepPoint::new(source.name(), algorithm, command.step, removal);
    let report = experiment.run_point(&input, point);
    if let PointOutcome::Failed(error) = report.outcome() {
        return Err(CliError::Point(Box::new(error.clone())));
    }
    Ok(ExecutionSummary::Run(Box::new(report)))
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(path = %command.path.display(), nodes = command.nodes, seed = command.seed),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let format = match command.format.as_deref() {
        Some(name) => name.parse::<GraphFormat>()?,
        None => GraphFormat::from_path(&command.path)?,
    };
    let orientation = if command.directed {
        Orientation::Directed
    } else {
        Orientation::Undirected
    };
    let config = SyntheticGraphConfig::new(command.nodes, command.extra_edges, command.seed)
        .with_orientation(orientation)
        .with_max_weight(command.max_weight);
    let graph = generate(&config)?;

    let io_error = |source| CliError::Io {
        path: command.path.clone(),
        source,
    };
    let file = File::create(&command.path).map_err(io_error)?;
    write_graph(&graph, format, BufWriter::new(file)).map_err(io_error)?;
    info!(
        format = %format,
        edges = graph.edge_count(),
        "graph written"
    );
    Ok(ExecutionSummary::Generate(GeneratedGraph {
        path: command.path.clone(),
        format,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    }))
}

pub(super) fn open_source(
    path: &Path,
    format: Option<&str>,
    orientation: Orientation,
) -> Result<TabularGraphSource, TabularSourceError> {
    match format {
        Some(name) => Ok(TabularGraphSource::with_format(
            path,
            name.parse::<GraphFormat>()?,
            orientation,
        )),
        None => Ok(TabularGraphSource::new(path, orientation)),
    }
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Sweep(jobs) => {
            for job in jobs {
                writeln!(
                    writer,
                    "{}\t{}\t{}\tcompleted {}\tskipped {}\tfailed {}",
                    job.input,
                    job.algorithm,
                    job.output.display(),
                    job.summary.completed(),
                    job.summary.skipped(),
                    job.summary.failed()
                )?;
            }
        }
        ExecutionSummary::Run(report) => write_report(report, &mut writer)?,
        ExecutionSummary::Generate(graph) => writeln!(
            writer,
            "wrote {} ({}): {} nodes, {} edges",
            graph.path.display(),
            graph.format,
            graph.nodes,
            graph.edges
        )?,
    }
    Ok(())
}
