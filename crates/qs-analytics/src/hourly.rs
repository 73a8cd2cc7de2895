//! Per-hour breakdown of one run, bucketed by arrival time.
//!
//! Buckets live in a `BTreeMap<u64, HourBucket>` so iteration is always in
//! ascending hour order.  The peak-hour tie-break (smallest hour wins) relies
//! on that order.

use std::collections::BTreeMap;

use qs_core::{Customer, TICKS_PER_HOUR};

/// Counters for one hour of one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourBucket {
    /// Customers that arrived during the hour.
    pub arrivals:   u64,
    /// Of those, customers whose service started.
    pub served:     u64,
    /// Of those, customers whose wait exceeded the stress threshold.
    pub stressed:   u64,
    /// Sum of the started customers' waits.
    pub total_wait: u64,
}

impl HourBucket {
    /// Mean wait of customers served from this hour.  0 when none were
    /// served.
    pub fn average_wait(&self) -> f64 {
        if self.served == 0 {
            0.0
        } else {
            self.total_wait as f64 / self.served as f64
        }
    }
}

/// Hour-indexed breakdown of one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourlyReport {
    pub duration:          u64,
    pub stress_threshold:  u64,
    /// Every hour in `0..ceil(duration / 60)`, plus any later hour a customer
    /// arrived in.
    pub hours:             BTreeMap<u64, HourBucket>,
    /// Hour with the most arrivals, smallest hour on ties.  `None` only for
    /// [`HourlyReport::empty`].
    pub peak_arrival_hour: Option<u64>,
}

impl HourlyReport {
    /// Zero-filled report for a run in which nobody arrived.
    pub fn empty(duration: u64, stress_threshold: u64) -> Self {
        Self {
            duration,
            stress_threshold,
            hours: dense_hours(duration),
            peak_arrival_hour: None,
        }
    }

    pub fn bucket(&self, hour: u64) -> Option<&HourBucket> {
        self.hours.get(&hour)
    }

    /// `average_wait()` of every bucket, in hour order.
    pub fn average_wait_per_hour(&self) -> BTreeMap<u64, f64> {
        self.hours.iter().map(|(&h, b)| (h, b.average_wait())).collect()
    }

    pub fn total_arrivals(&self) -> u64 {
        self.hours.values().map(|b| b.arrivals).sum()
    }

    /// Hours in which at least one customer was stressed.
    pub fn stressed_hours(&self) -> impl Iterator<Item = u64> + '_ {
        self.hours.iter().filter(|(_, b)| b.stressed > 0).map(|(&h, _)| h)
    }
}

/// Builds a [`HourlyReport`] from a run's customers.
#[derive(Clone, Debug)]
pub struct HourlyAnalyzer {
    duration:         u64,
    stress_threshold: u64,
}

impl HourlyAnalyzer {
    pub fn new(duration: u64, stress_threshold: u64) -> Self {
        Self { duration, stress_threshold }
    }

    /// Returns `None` if no customers arrived.
    pub fn analyze(&self, customers: &[Customer]) -> Option<HourlyReport> {
        if customers.is_empty() {
            return None;
        }

        let mut hours = dense_hours(self.duration);
        for customer in customers {
            let bucket = hours.entry(customer.arrival.hour()).or_default();
            bucket.arrivals += 1;
            if let Some(wait) = customer.wait_time() {
                bucket.served += 1;
                bucket.total_wait += wait;
                if wait > self.stress_threshold {
                    bucket.stressed += 1;
                }
            }
        }

        let mut peak: Option<(u64, u64)> = None;
        for (&hour, bucket) in &hours {
            // Strict `>` keeps the earliest hour on ties.
            if peak.is_none_or(|(_, best)| bucket.arrivals > best) {
                peak = Some((hour, bucket.arrivals));
            }
        }

        Some(HourlyReport {
            duration: self.duration,
            stress_threshold: self.stress_threshold,
            hours,
            peak_arrival_hour: peak.map(|(hour, _)| hour),
        })
    }
}

fn dense_hours(duration: u64) -> BTreeMap<u64, HourBucket> {
    (0..duration.div_ceil(TICKS_PER_HOUR))
        .map(|h| (h, HourBucket::default()))
        .collect()
}
