//! The `ReportWriter` trait implemented by tabular backends.

use qs_batch::{BatchReport, RunRecord};

use crate::OutputResult;

/// Sink for per-run batch results.
pub trait ReportWriter {
    /// Write every table row belonging to one run.
    fn write_run(&mut self, run: &RunRecord) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every run of `report` in run order, then finish.
    fn write_batch(&mut self, report: &BatchReport) -> OutputResult<()> {
        for run in &report.runs {
            self.write_run(run)?;
        }
        self.finish()
    }
}
