//! Destination for sweep point reports.

use std::convert::Infallible;

use super::{SweepPointReport, SweepSummary};

/// Receives every sweep point report in sweep order.
///
/// The runner treats the sink as opaque: layout, naming and serialisation
/// belong to the implementation. An error from either method aborts the
/// sweep.
///
/// # Examples
/// ```
/// use std::convert::Infallible;
///
/// use graphsweep_core::{ResultSink, SweepPointReport};
///
/// #[derive(Default)]
/// struct CountingSink(usize);
///
/// impl ResultSink for CountingSink {
///     type Error = Infallible;
///
///     fn record(&mut self, _report: &SweepPointReport) -> Result<(), Infallible> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait ResultSink {
    /// Error raised when a report cannot be stored.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stores one report.
    ///
    /// # Errors
    /// Returns the sink's error when the report cannot be stored.
    fn record(&mut self, report: &SweepPointReport) -> Result<(), Self::Error>;

    /// Called once after the last report.
    ///
    /// # Errors
    /// Returns the sink's error when pending output cannot be flushed.
    fn finish(&mut self, summary: &SweepSummary) -> Result<(), Self::Error> {
        let _ = summary;
        Ok(())
    }
}

/// Collects reports in memory.
impl ResultSink for Vec<SweepPointReport> {
    type Error = Infallible;

    fn record(&mut self, report: &SweepPointReport) -> Result<(), Self::Error> {
        self.push(report.clone());
        Ok(())
    }
}
