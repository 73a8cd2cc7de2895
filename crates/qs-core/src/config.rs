//! Run and analysis configuration.
//!
//! Every tunable lives in one of the structs below and is passed explicitly
//! to the component that needs it.  The `Default` impls hold the standard
//! values (an 8-hour day with two servers); the console runner loads
//! overrides from a JSON file.

use crate::{CoreError, CoreResult};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Configuration for one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Length of the arrival window in minutes.  No customer arrives at or
    /// after this tick; customers already admitted are still served.
    pub duration: u64,

    /// Number of parallel servers.
    pub server_count: u32,

    /// Upper bound (inclusive) of the uniform inter-arrival gap, in minutes.
    pub max_arrival_interval: u64,

    /// Upper bound (inclusive) of the uniform service duration, in minutes.
    pub max_service_time: u64,

    /// Customers waiting strictly longer than this many minutes are stressed.
    pub stress_threshold: u64,

    /// RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration:             480,
            server_count:         2,
            max_arrival_interval: 4,
            max_service_time:     12,
            stress_threshold:     5,
            seed:                 42,
        }
    }
}

impl SimConfig {
    /// Reject any zero bound.  `stress_threshold` may be zero.
    pub fn validate(&self) -> CoreResult<()> {
        let checks = [
            ("duration", self.duration),
            ("server_count", u64::from(self.server_count)),
            ("max_arrival_interval", self.max_arrival_interval),
            ("max_service_time", self.max_service_time),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(CoreError::NonPositive { field });
            }
        }
        Ok(())
    }

    /// Number of hour buckets spanned by the arrival window (rounded up).
    #[inline]
    pub fn hours(&self) -> u64 {
        self.duration.div_ceil(crate::TICKS_PER_HOUR)
    }
}

// ── InsightThresholds ─────────────────────────────────────────────────────────

/// Stress-percentage cut-offs for the qualitative insight tier of a run.
///
/// A run with no stressed customers is always "excellent"; otherwise the
/// first bound the stress percentage falls below decides the tier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InsightThresholds {
    /// Stress percentage below which the run is "good".
    pub good_below: f64,
    /// Stress percentage below which the run is "under pressure".
    pub pressure_below: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self { good_below: 25.0, pressure_below: 50.0 }
    }
}

impl InsightThresholds {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=100.0).contains(&self.good_below) {
            return Err(CoreError::OutOfRange {
                field:    "good_below",
                value:    self.good_below,
                expected: "[0, 100]",
            });
        }
        if !(self.good_below..=100.0).contains(&self.pressure_below) {
            return Err(CoreError::OutOfRange {
                field:    "pressure_below",
                value:    self.pressure_below,
                expected: "[good_below, 100]",
            });
        }
        Ok(())
    }
}

// ── PatternConfig ─────────────────────────────────────────────────────────────

/// Thresholds for cross-run pattern detection and suggestions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PatternConfig {
    /// Mean utilization (%) above which adding capacity is suggested.
    pub high_utilization_threshold: f64,

    /// Mean utilization (%) below which reducing capacity is suggested.
    pub low_utilization_threshold: f64,

    /// Mean wait (minutes) above which faster service or more staff is
    /// suggested.
    pub high_wait_time_threshold: f64,

    /// Fraction of runs (0–1] that must show stress in the same hour for that
    /// hour to count as a systemic bottleneck.
    pub stress_consistency_threshold: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            high_utilization_threshold:   90.0,
            low_utilization_threshold:    40.0,
            high_wait_time_threshold:     7.0,
            stress_consistency_threshold: 0.6,
        }
    }
}

impl PatternConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=100.0).contains(&self.high_utilization_threshold) {
            return Err(CoreError::OutOfRange {
                field:    "high_utilization_threshold",
                value:    self.high_utilization_threshold,
                expected: "[0, 100]",
            });
        }
        if !(0.0..=self.high_utilization_threshold).contains(&self.low_utilization_threshold) {
            return Err(CoreError::OutOfRange {
                field:    "low_utilization_threshold",
                value:    self.low_utilization_threshold,
                expected: "[0, high_utilization_threshold]",
            });
        }
        if self.high_wait_time_threshold < 0.0 || self.high_wait_time_threshold.is_nan() {
            return Err(CoreError::OutOfRange {
                field:    "high_wait_time_threshold",
                value:    self.high_wait_time_threshold,
                expected: "[0, inf)",
            });
        }
        let c = self.stress_consistency_threshold;
        if !(c > 0.0 && c <= 1.0) {
            return Err(CoreError::OutOfRange {
                field:    "stress_consistency_threshold",
                value:    c,
                expected: "(0, 1]",
            });
        }
        Ok(())
    }
}
