//! Plain-text console dashboard.

use std::fmt::{self, Write};

use qs_batch::BatchReport;

const RULE_WIDTH: usize = 50;

/// Render the last run's summary, the cross-run patterns, and the
/// suggestions of `report`.
pub fn render(report: &BatchReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, report);
    out
}

fn write_dashboard(out: &mut impl Write, report: &BatchReport) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "QUEUE SIMULATION DASHBOARD")?;
    writeln!(out, "{rule}")?;

    // ── Last run ──────────────────────────────────────────────────────────
    let run_no = report.runs.len();
    writeln!(out, "\n--- Summary of Last Run (Run #{run_no}) ---")?;
    match report.last_run().map(|r| &r.summary).filter(|s| s.has_data()) {
        Some(s) => {
            writeln!(out, "  Customers served:   {}", s.total_served)?;
            writeln!(out, "  Average wait:       {:.2} minutes", s.avg_wait)?;
            writeln!(out, "  Max wait:           {} minutes", s.max_wait)?;
            writeln!(out, "  Server utilization: {:.2}%", s.utilization)?;
            writeln!(
                out,
                "  Stressed customers: {} (waited > {} min)",
                s.stressed_count, s.stress_threshold,
            )?;
            writeln!(out, "  Insight [{}]: {}", s.insight.severity(), s.insight_message())?;
        }
        None => writeln!(out, "  No data available for the last run.")?,
    }

    // ── Patterns ──────────────────────────────────────────────────────────
    let p = &report.patterns;
    writeln!(out, "\n--- Patterns Across {} Runs ---", p.run_count)?;
    writeln!(out, "  Avg. server utilization: {:.2}%", p.avg_utilization)?;
    writeln!(out, "  Avg. wait time:          {:.2} minutes", p.avg_wait_time)?;
    writeln!(out, "  Avg. customers served:   {:.1}", p.avg_customers_served)?;
    writeln!(out, "  Most common peak hour:   {}", hour_or(p.most_common_peak_hour, "n/a"))?;
    writeln!(out, "  Consistent stress hour:  {}", hour_or(p.consistently_stressed_hour, "none"))?;

    // ── Suggestions ───────────────────────────────────────────────────────
    writeln!(out, "\n--- Suggestions ---")?;
    if report.suggestions.is_empty() {
        writeln!(out, "  * No specific actions recommended at this time.")?;
    }
    for line in &report.suggestions {
        writeln!(out, "  * {line}")?;
    }
    writeln!(out, "{rule}")
}

fn hour_or(hour: Option<u64>, missing: &str) -> String {
    hour.map_or_else(|| missing.to_string(), |h| format!("hour {h}"))
}
