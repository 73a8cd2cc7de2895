//! `qs-output` — reporting backends for queuesim batch results.
//!
//! | Writer             | Files created                                                  |
//! |--------------------|----------------------------------------------------------------|
//! | [`CsvWriter`]      | `run_summaries.csv`, `hourly_breakdown.csv`, `customers.csv`   |
//! | [`JsonReportWriter`] | `patterns.json` (or any path the caller picks)               |
//! | [`dashboard`]      | none; renders a text dashboard for the terminal                |
//!
//! # Usage
//!
//! ```rust,ignore
//! use qs_output::{CsvWriter, JsonReportWriter, ReportWriter};
//!
//! let report = qs_batch::run_replications(&config)?;
//! CsvWriter::new(Path::new("./output"))?.write_batch(&report)?;
//! JsonReportWriter::write(&dir.join("patterns.json"), &report.patterns, &report.suggestions)?;
//! print!("{}", qs_output::dashboard::render(&report));
//! ```

pub mod csv;
pub mod dashboard;
pub mod error;
pub mod json;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::{JsonReportWriter, PatternReport};
pub use row::{CustomerRow, HourRow, RunSummaryRow};
pub use writer::ReportWriter;
