//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `run_summaries.csv`
//! - `hourly_breakdown.csv`
//! - `customers.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use qs_batch::RunRecord;

use crate::row::{CustomerRow, HourRow, RunSummaryRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

pub const RUN_SUMMARIES_FILE: &str = "run_summaries.csv";
pub const HOURLY_FILE: &str = "hourly_breakdown.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";

/// Writes batch results to three CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    hourly:    Writer<File>,
    customers: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join(RUN_SUMMARIES_FILE))?;
        summaries.write_record([
            "run", "seed", "total_served", "avg_wait", "max_wait", "utilization", "stressed", "insight",
        ])?;

        let mut hourly = Writer::from_path(dir.join(HOURLY_FILE))?;
        hourly.write_record(["run", "hour", "arrivals", "served", "stressed", "total_wait", "avg_wait"])?;

        let mut customers = Writer::from_path(dir.join(CUSTOMERS_FILE))?;
        customers.write_record(["run", "customer_id", "arrival", "service_time", "start", "end", "wait"])?;

        Ok(Self { summaries, hourly, customers, finished: false })
    }

    pub fn write_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.seed.to_string(),
            row.total_served.to_string(),
            format!("{:.2}", row.avg_wait),
            row.max_wait.to_string(),
            format!("{:.2}", row.utilization),
            row.stressed.to_string(),
            row.insight.to_string(),
        ])?;
        Ok(())
    }

    pub fn write_hours(&mut self, rows: &[HourRow]) -> OutputResult<()> {
        for row in rows {
            self.hourly.write_record(&[
                row.run.to_string(),
                row.hour.to_string(),
                row.arrivals.to_string(),
                row.served.to_string(),
                row.stressed.to_string(),
                row.total_wait.to_string(),
                format!("{:.2}", row.avg_wait),
            ])?;
        }
        Ok(())
    }

    pub fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()> {
        for row in rows {
            self.customers.write_record(&[
                row.run.to_string(),
                row.customer_id.to_string(),
                row.arrival.to_string(),
                row.service_time.to_string(),
                opt(row.start),
                opt(row.end),
                opt(row.wait),
            ])?;
        }
        Ok(())
    }
}

fn opt(v: Option<u64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

impl ReportWriter for CsvWriter {
    fn write_run(&mut self, run: &RunRecord) -> OutputResult<()> {
        self.write_summary(&RunSummaryRow::new(run.index, run.seed, &run.summary))?;

        let hours: Vec<_> = run
            .hourly
            .hours
            .iter()
            .map(|(&hour, bucket)| HourRow::new(run.index, hour, bucket))
            .collect();
        self.write_hours(&hours)?;

        let customers: Vec<_> = run.customers.iter().map(|c| CustomerRow::new(run.index, c)).collect();
        self.write_customers(&customers)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.hourly.flush()?;
        self.customers.flush()?;
        Ok(())
    }
}
