//! Cross-run pattern detection and suggestions.
//!
//! # Rules
//!
//! All applicable rules fire, in this order:
//!
//! | Condition                                        | Suggestion           |
//! |--------------------------------------------------|----------------------|
//! | `avg_utilization > high_utilization_threshold`   | add capacity         |
//! | `avg_utilization < low_utilization_threshold`    | reduce capacity      |
//! | `avg_wait_time > high_wait_time_threshold`       | shorten service/staff|
//! | a consistently stressed hour exists              | temporary staffing   |
//!
//! If none fire, a single "operating efficiently" suggestion is returned.

use std::collections::BTreeMap;
use std::fmt;

use qs_core::PatternConfig;

use crate::{AnalyticsError, AnalyticsResult, HourlyReport, RunSummary};

// ── Suggestion ────────────────────────────────────────────────────────────────

/// One actionable recommendation.  `Display` renders the user-facing text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Suggestion {
    AddCapacity { avg_utilization: f64, threshold: f64 },
    ReduceCapacity { avg_utilization: f64, threshold: f64 },
    ReduceWaitTime { avg_wait_time: f64, threshold: f64 },
    TemporaryStaffing { hour: u64, consistency: f64 },
    OperatingEfficiently,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::AddCapacity { avg_utilization, threshold } => write!(
                f,
                "Servers are {avg_utilization:.1}% busy on average (above {threshold:.0}%). \
                 Consider adding capacity.",
            ),
            Suggestion::ReduceCapacity { avg_utilization, threshold } => write!(
                f,
                "Servers are only {avg_utilization:.1}% busy on average (below {threshold:.0}%). \
                 Consider reducing capacity or adjusting opening hours.",
            ),
            Suggestion::ReduceWaitTime { avg_wait_time, threshold } => write!(
                f,
                "Average wait is {avg_wait_time:.2} minutes (above {threshold:.1}). \
                 Consider reducing service time or adding staff.",
            ),
            Suggestion::TemporaryStaffing { hour, consistency } => write!(
                f,
                "Stress occurs at hour {hour} in {:.0}% of runs. \
                 Add a temporary assistant during that hour.",
                consistency * 100.0,
            ),
            Suggestion::OperatingEfficiently => {
                f.write_str("System is operating efficiently across all runs.")
            }
        }
    }
}

// ── PatternSet ────────────────────────────────────────────────────────────────

/// Aggregates across a batch of runs plus the suggestions they trigger.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternSet {
    pub run_count:                 usize,
    pub avg_utilization:           f64,
    pub avg_wait_time:             f64,
    pub avg_customers_served:      f64,
    /// Mode of the runs' peak arrival hours; first-seen hour on ties.
    pub most_common_peak_hour:     Option<u64>,
    /// Smallest hour stressed in at least the configured fraction of runs.
    pub consistently_stressed_hour: Option<u64>,
    /// Fraction of runs stressed at `consistently_stressed_hour` (0 if none).
    pub stress_consistency:        f64,
    pub suggestions:               Vec<Suggestion>,
}

// ── PatternEngine ─────────────────────────────────────────────────────────────

/// Aggregates index-aligned run summaries and hourly reports.
///
/// Holds only the per-run aggregates, never per-customer records.
pub struct PatternEngine {
    summaries: Vec<RunSummary>,
    reports:   Vec<HourlyReport>,
    config:    PatternConfig,
}

impl PatternEngine {
    /// `summaries[i]` and `reports[i]` must describe the same run.
    pub fn new(
        summaries: Vec<RunSummary>,
        reports:   Vec<HourlyReport>,
        config:    PatternConfig,
    ) -> AnalyticsResult<Self> {
        config.validate()?;
        if summaries.len() != reports.len() {
            return Err(AnalyticsError::Alignment {
                summaries: summaries.len(),
                reports:   reports.len(),
            });
        }
        if summaries.is_empty() {
            return Err(AnalyticsError::EmptyBatch);
        }
        Ok(Self { summaries, reports, config })
    }

    pub fn run_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn analyze(&self) -> PatternSet {
        let avg_utilization = mean_of(&self.summaries, |s| s.utilization);
        let avg_wait_time = mean_of(&self.summaries, |s| s.avg_wait);
        let avg_customers_served = mean_of(&self.summaries, |s| s.total_served as f64);

        let most_common_peak_hour = self.most_common_peak_hour();
        let stressed = self.consistently_stressed_hour();

        let mut set = PatternSet {
            run_count: self.summaries.len(),
            avg_utilization,
            avg_wait_time,
            avg_customers_served,
            most_common_peak_hour,
            consistently_stressed_hour: stressed.map(|(h, _)| h),
            stress_consistency: stressed.map_or(0.0, |(_, c)| c),
            suggestions: Vec::new(),
        };
        set.suggestions = self.rules(&set);

        log::debug!(
            "patterns over {} runs: util {:.1}% wait {:.2} peak {:?} stressed {:?}",
            set.run_count,
            set.avg_utilization,
            set.avg_wait_time,
            set.most_common_peak_hour,
            set.consistently_stressed_hour,
        );
        set
    }

    /// Rendered suggestion strings, in rule order.
    pub fn suggest(&self) -> Vec<String> {
        self.analyze().suggestions.iter().map(ToString::to_string).collect()
    }

    // ── Detectors ─────────────────────────────────────────────────────────

    fn most_common_peak_hour(&self) -> Option<u64> {
        // (hour, count) in first-encounter order.
        let mut counts: Vec<(u64, usize)> = Vec::new();
        for hour in self.reports.iter().filter_map(|r| r.peak_arrival_hour) {
            match counts.iter_mut().find(|(h, _)| *h == hour) {
                Some((_, c)) => *c += 1,
                None => counts.push((hour, 1)),
            }
        }
        let mut best: Option<(u64, usize)> = None;
        for (hour, count) in counts {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((hour, count));
            }
        }
        best.map(|(hour, _)| hour)
    }

    fn consistently_stressed_hour(&self) -> Option<(u64, f64)> {
        let mut runs_stressed: BTreeMap<u64, usize> = BTreeMap::new();
        for report in &self.reports {
            for hour in report.stressed_hours() {
                *runs_stressed.entry(hour).or_default() += 1;
            }
        }
        let n = self.reports.len() as f64;
        runs_stressed
            .into_iter()
            .map(|(hour, count)| (hour, count as f64 / n))
            .find(|&(_, fraction)| fraction >= self.config.stress_consistency_threshold)
    }

    fn rules(&self, set: &PatternSet) -> Vec<Suggestion> {
        let cfg = &self.config;
        let mut out = Vec::new();
        if set.avg_utilization > cfg.high_utilization_threshold {
            out.push(Suggestion::AddCapacity {
                avg_utilization: set.avg_utilization,
                threshold:       cfg.high_utilization_threshold,
            });
        }
        if set.avg_utilization < cfg.low_utilization_threshold {
            out.push(Suggestion::ReduceCapacity {
                avg_utilization: set.avg_utilization,
                threshold:       cfg.low_utilization_threshold,
            });
        }
        if set.avg_wait_time > cfg.high_wait_time_threshold {
            out.push(Suggestion::ReduceWaitTime {
                avg_wait_time: set.avg_wait_time,
                threshold:     cfg.high_wait_time_threshold,
            });
        }
        if let Some(hour) = set.consistently_stressed_hour {
            out.push(Suggestion::TemporaryStaffing { hour, consistency: set.stress_consistency });
        }
        if out.is_empty() {
            out.push(Suggestion::OperatingEfficiently);
        }
        out
    }
}

/// Mean of `f` over `summaries`.  `PatternEngine::new` rejects empty
/// batches, so the divisor is never zero there; an empty slice yields 0.
fn mean_of(summaries: &[RunSummary], f: impl Fn(&RunSummary) -> f64) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    summaries.iter().map(f).sum::<f64>() / summaries.len() as f64
}
