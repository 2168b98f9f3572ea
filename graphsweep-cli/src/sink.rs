//! Directory-backed [`ResultSink`].
//!
//! Layout under the output root:
//!
//! ```text
//! <root>/<input>/<algorithm>/step_<s>/removal_<p>/results.txt
//! <root>/<input>/<algorithm>/step_<s>/removal_<p>/times.csv
//! <root>/summary.csv
//! <root>/skipped.csv
//! ```
//!
//! `<input>` is the input identifier made safe for a single path component
//! (see [`input_dir`]). `summary.csv` and `skipped.csv` are appended to, so
//! several inputs and sweeps can share an output root. Every CSV file is
//! written through [`csv::Writer`].

use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use cap_std::{
    ambient_authority,
    fs::{Dir, OpenOptions},
};
use graphsweep_core::{PointOutcome, ResultSink, SweepPoint, SweepPointReport, SweepSummary, TrialSet};
use thiserror::Error;
use tracing::{debug, info};

use crate::render::write_trial;

/// Columns of `summary.csv`.
pub const SUMMARY_COLUMNS: [&str; 5] = ["algorithm", "input", "step", "removal", "average_ns"];
/// Columns of `skipped.csv`.
pub const SKIPPED_COLUMNS: [&str; 7] =
    ["algorithm", "input", "step", "removal", "status", "code", "reason"];
/// Columns of each `times.csv`.
pub const TIMES_COLUMNS: [&str; 2] = ["repetition", "elapsed_ns"];

/// Maps an input identifier to a single path component.
///
/// Characters outside `[A-Za-z0-9._-]` become `_` and leading `_` or `.`
/// are dropped, so the result never escapes the output root.
///
/// # Examples
/// ```
/// use graphsweep_cli::sink::input_dir;
///
/// assert_eq!(input_dir("data/roads.csv"), "data_roads.csv");
/// assert_eq!(input_dir("../grid.matrix"), "grid.matrix");
/// assert_eq!(input_dir("///"), "input");
/// ```
#[must_use]
pub fn input_dir(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.trim_start_matches(['_', '.']) {
        "" => "input".to_owned(),
        trimmed => trimmed.to_owned(),
    }
}

/// Point metadata shared by `summary.csv` and `skipped.csv` rows.
fn point_fields(point: &SweepPoint) -> Vec<String> {
    vec![
        point.algorithm().to_string(),
        point.input().to_owned(),
        point.step().to_string(),
        point.removal().get().to_string(),
    ]
}

/// Writes `records` as CSV, preceded by `header` when given.
fn write_records<W: Write>(
    writer: W,
    header: Option<&[&str]>,
    records: impl IntoIterator<Item = Vec<String>>,
) -> io::Result<()> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    if let Some(columns) = header {
        out.write_record(columns)?;
    }
    for record in records {
        out.write_record(&record)?;
    }
    out.flush()
}

/// Failure to write sweep output.
#[derive(Debug, Error)]
#[error("failed to write `{path}` under `{root}`: {source}")]
pub struct SinkError {
    root: PathBuf,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl SinkError {
    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path, relative to the root, that could not be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes sweep reports below one output root.
#[derive(Debug)]
pub struct DirectorySink {
    root: Dir,
    root_path: PathBuf,
    recorded: usize,
}

impl DirectorySink {
    /// Creates `root` if needed and opens it.
    ///
    /// # Errors
    /// Returns [`SinkError`] when the directory cannot be created or opened.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let root_path = root.into();
        let wrap = |source| SinkError {
            root: root_path.clone(),
            path: PathBuf::from("."),
            source,
        };
        Dir::create_ambient_dir_all(&root_path, ambient_authority()).map_err(wrap)?;
        let root = Dir::open_ambient_dir(&root_path, ambient_authority()).map_err(wrap)?;
        Ok(Self {
            root,
            root_path,
            recorded: 0,
        })
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Returns the number of reports written so far.
    #[must_use]
    #[rustfmt::skip]
    pub const fn recorded(&self) -> usize { self.recorded }

    /// Relative directory holding the files of `point`.
    #[must_use]
    pub fn point_dir(point: &SweepPoint) -> PathBuf {
        PathBuf::from(input_dir(point.input()))
            .join(point.algorithm().as_str())
            .join(format!("step_{}", point.step()))
            .join(format!("removal_{}", point.removal().get()))
    }

    fn error(&self, path: &Path, source: io::Error) -> SinkError {
        SinkError {
            root: self.root_path.clone(),
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_completed(&self, point: &SweepPoint, trials: &TrialSet) -> Result<(), SinkError> {
        let dir = Self::point_dir(point);
        self.root
            .create_dir_all(&dir)
            .map_err(|err| self.error(&dir, err))?;

        let results = dir.join("results.txt");
        self.write_file(&results, |writer| {
            for trial in trials.trials() {
                write_trial(trial, &mut *writer)?;
            }
            Ok(())
        })?;

        let times = dir.join("times.csv");
        self.write_file(&times, |writer| {
            let rows = trials.trials().iter().map(|trial| {
                vec![
                    trial.repetition().to_string(),
                    trial.elapsed().as_nanos().to_string(),
                ]
            });
            write_records(writer, Some(TIMES_COLUMNS.as_slice()), rows)
        })?;

        let mut row = point_fields(point);
        row.push(trials.average_elapsed().as_nanos().to_string());
        self.append_row(Path::new("summary.csv"), &SUMMARY_COLUMNS, row)
    }

    fn write_unfinished(
        &self,
        point: &SweepPoint,
        status: &str,
        code: &str,
        reason: &str,
    ) -> Result<(), SinkError> {
        let mut row = point_fields(point);
        row.extend([status.to_owned(), code.to_owned(), reason.to_owned()]);
        self.append_row(Path::new("skipped.csv"), &SKIPPED_COLUMNS, row)
    }

    fn write_file(
        &self,
        path: &Path,
        body: impl FnOnce(&mut BufWriter<cap_std::fs::File>) -> io::Result<()>,
    ) -> Result<(), SinkError> {
        let file = self.root.create(path).map_err(|err| self.error(path, err))?;
        let mut writer = BufWriter::new(file);
        body(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|err| self.error(path, err))
    }

    fn append_row(&self, path: &Path, columns: &[&str], row: Vec<String>) -> Result<(), SinkError> {
        let fresh = !self.root.exists(path);
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        let file = self
            .root
            .open_with(path, &options)
            .map_err(|err| self.error(path, err))?;
        write_records(file, fresh.then_some(columns), [row])
            .map_err(|err| self.error(path, err))
    }
}

impl ResultSink for DirectorySink {
    type Error = SinkError;

    fn record(&mut self, report: &SweepPointReport) -> Result<(), SinkError> {
        let point = report.point();
        match report.outcome() {
            PointOutcome::Completed(trials) => self.write_completed(point, trials)?,
            PointOutcome::Skipped(reason) => {
                self.write_unfinished(point, "skipped", reason.code().as_str(), &reason.to_string())?;
            }
            PointOutcome::Failed(error) => {
                self.write_unfinished(point, "failed", error.code(), &error.kind().to_string())?;
            }
        }
        self.recorded += 1;
        debug!(root = %self.root_path.display(), %point, "report written");
        Ok(())
    }

    fn finish(&mut self, summary: &SweepSummary) -> Result<(), SinkError> {
        info!(
            root = %self.root_path.display(),
            reports = self.recorded,
            completed = summary.completed(),
            "results written"
        );
        Ok(())
    }
}
