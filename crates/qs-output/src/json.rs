//! JSON export of cross-run patterns.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use qs_analytics::PatternSet;
use serde::{Deserialize, Serialize};

use crate::OutputResult;

pub const PATTERNS_FILE: &str = "patterns.json";

/// Document layout of the pattern report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub patterns:    PatternSet,
    pub suggestions: Vec<String>,
}

/// Writes `{ "patterns": {...}, "suggestions": [...] }` pretty-printed.
pub struct JsonReportWriter;

impl JsonReportWriter {
    pub fn write(path: &Path, patterns: &PatternSet, suggestions: &[String]) -> OutputResult<()> {
        #[derive(Serialize)]
        struct Doc<'a> {
            patterns:    &'a PatternSet,
            suggestions: &'a [String],
        }

        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, &Doc { patterns, suggestions })?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Read a report previously produced by [`write`][Self::write].
    pub fn read(path: &Path) -> OutputResult<PatternReport> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
