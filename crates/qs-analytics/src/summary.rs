//! Scalar statistics and the qualitative insight tier of one run.

use std::fmt;

use qs_core::{Customer, InsightThresholds};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Engine counters needed for utilization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BusyTime {
    /// Sum over ticks of the number of busy servers at tick end.
    pub total_busy_time: u64,
    /// Ticks fully processed before the run terminated.
    pub elapsed_ticks:   u64,
    pub server_count:    u32,
}

impl BusyTime {
    /// Busy server-ticks as a percentage of available server-ticks.
    ///
    /// Scaled by `server_count` so a multi-server run never exceeds 100.
    /// Returns 0 when no server-ticks elapsed.
    pub fn utilization_percent(&self) -> f64 {
        let capacity = self.elapsed_ticks * u64::from(self.server_count);
        if capacity == 0 {
            return 0.0;
        }
        self.total_busy_time as f64 / capacity as f64 * 100.0
    }
}

// ── Insight tier ──────────────────────────────────────────────────────────────

/// Qualitative grade of a run, derived from its stress percentage.
///
/// `label()` and `severity()` are opaque tokens for display layers; nothing
/// in the workspace branches on them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InsightTier {
    NoData,
    Excellent,
    Good,
    UnderPressure,
    Overloaded,
}

impl InsightTier {
    /// First match wins: no stress → excellent, then the configured bounds.
    pub fn classify(stressed_count: usize, stress_percent: f64, thresholds: &InsightThresholds) -> Self {
        if stressed_count == 0 {
            InsightTier::Excellent
        } else if stress_percent < thresholds.good_below {
            InsightTier::Good
        } else if stress_percent < thresholds.pressure_below {
            InsightTier::UnderPressure
        } else {
            InsightTier::Overloaded
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsightTier::NoData        => "n/a",
            InsightTier::Excellent     => "excellent",
            InsightTier::Good          => "good",
            InsightTier::UnderPressure => "under pressure",
            InsightTier::Overloaded    => "overloaded",
        }
    }

    pub fn severity(self) -> &'static str {
        match self {
            InsightTier::NoData        => "none",
            InsightTier::Excellent     => "ok",
            InsightTier::Good          => "notice",
            InsightTier::UnderPressure => "warning",
            InsightTier::Overloaded    => "critical",
        }
    }
}

impl fmt::Display for InsightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Whether a summary was computed from at least one started customer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SummaryStatus {
    Measured,
    /// No customer started service.  Every statistic is zero; callers must
    /// branch on this rather than treat the zeros as measurements.
    NoData,
}

/// Derived scalars for one finished run.  Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub status:           SummaryStatus,
    /// Customers that arrived.
    pub total_customers:  usize,
    /// Customers whose service started (the ones with a wait time).
    pub total_served:     usize,
    /// Customers whose service completed.
    pub completed:        usize,
    pub avg_wait:         f64,
    pub max_wait:         u64,
    /// Percentage in `[0, 100]`.
    pub utilization:      f64,
    /// Customers with `wait_time > stress_threshold`.
    pub stressed_count:   usize,
    /// `stressed_count / total_served * 100`.
    pub stress_percent:   f64,
    pub stress_threshold: u64,
    pub insight:          InsightTier,
}

impl RunSummary {
    /// The zero-valued summary of a run in which nobody was served.
    pub fn no_data(total_customers: usize, utilization: f64, stress_threshold: u64) -> Self {
        Self {
            status: SummaryStatus::NoData,
            total_customers,
            total_served: 0,
            completed: 0,
            avg_wait: 0.0,
            max_wait: 0,
            utilization,
            stressed_count: 0,
            stress_percent: 0.0,
            stress_threshold,
            insight: InsightTier::NoData,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.status == SummaryStatus::Measured
    }

    /// One-line human description of the insight tier.
    pub fn insight_message(&self) -> String {
        match self.insight {
            InsightTier::NoData => "No customers were served.".to_string(),
            InsightTier::Excellent => "Excellent performance: all customers were served quickly.".to_string(),
            InsightTier::Good => format!(
                "Good performance: mostly smooth, though {} customer(s) waited longer than {} minutes.",
                self.stressed_count, self.stress_threshold,
            ),
            InsightTier::UnderPressure => format!(
                "Under pressure: {:.0}% of customers waited longer than {} minutes.",
                self.stress_percent, self.stress_threshold,
            ),
            InsightTier::Overloaded => {
                "System overloaded: a majority of customers faced unacceptable waits.".to_string()
            }
        }
    }
}

// ── SummaryCalculator ─────────────────────────────────────────────────────────

/// Turns a run's customer records into a [`RunSummary`].
#[derive(Clone, Debug)]
pub struct SummaryCalculator {
    stress_threshold: u64,
    thresholds:       InsightThresholds,
}

impl SummaryCalculator {
    pub fn new(stress_threshold: u64) -> Self {
        Self { stress_threshold, thresholds: InsightThresholds::default() }
    }

    pub fn with_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn calculate(&self, customers: &[Customer], busy: BusyTime) -> RunSummary {
        let utilization = busy.utilization_percent();

        let waits: Vec<u64> = customers.iter().filter_map(Customer::wait_time).collect();
        if waits.is_empty() {
            return RunSummary::no_data(customers.len(), utilization, self.stress_threshold);
        }

        let served = waits.len();
        let total_wait: u64 = waits.iter().sum();
        let max_wait = waits.iter().copied().max().unwrap_or(0);
        let stressed_count = waits.iter().filter(|&&w| w > self.stress_threshold).count();
        // `served` is non-zero past the early return above.
        let stress_percent = stressed_count as f64 / served as f64 * 100.0;

        RunSummary {
            status: SummaryStatus::Measured,
            total_customers: customers.len(),
            total_served: served,
            completed: customers.iter().filter(|c| c.is_served()).count(),
            avg_wait: total_wait as f64 / served as f64,
            max_wait,
            utilization,
            stressed_count,
            stress_percent,
            stress_threshold: self.stress_threshold,
            insight: InsightTier::classify(stressed_count, stress_percent, &self.thresholds),
        }
    }
}
