//! Flat row types written by the CSV backend.

use qs_analytics::{HourBucket, RunSummary};
use qs_core::Customer;

/// One line of `run_summaries.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummaryRow {
    pub run:          usize,
    pub seed:         u64,
    pub total_served: usize,
    pub avg_wait:     f64,
    pub max_wait:     u64,
    pub utilization:  f64,
    pub stressed:     usize,
    pub insight:      &'static str,
}

impl RunSummaryRow {
    pub fn new(run: usize, seed: u64, s: &RunSummary) -> Self {
        Self {
            run,
            seed,
            total_served: s.total_served,
            avg_wait:     s.avg_wait,
            max_wait:     s.max_wait,
            utilization:  s.utilization,
            stressed:     s.stressed_count,
            insight:      s.insight.label(),
        }
    }
}

/// One line of `hourly_breakdown.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourRow {
    pub run:        usize,
    pub hour:       u64,
    pub arrivals:   u64,
    pub served:     u64,
    pub stressed:   u64,
    pub total_wait: u64,
    pub avg_wait:   f64,
}

impl HourRow {
    pub fn new(run: usize, hour: u64, b: &HourBucket) -> Self {
        Self {
            run,
            hour,
            arrivals:   b.arrivals,
            served:     b.served,
            stressed:   b.stressed,
            total_wait: b.total_wait,
            avg_wait:   b.average_wait(),
        }
    }
}

/// One line of `customers.csv`.  Timing columns are `None` (written empty)
/// for customers that never reached that stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerRow {
    pub run:          usize,
    pub customer_id:  u32,
    pub arrival:      u64,
    pub service_time: u64,
    pub start:        Option<u64>,
    pub end:          Option<u64>,
    pub wait:         Option<u64>,
}

impl CustomerRow {
    pub fn new(run: usize, c: &Customer) -> Self {
        Self {
            run,
            customer_id:  c.id.0,
            arrival:      c.arrival.0,
            service_time: c.service_time,
            start:        c.start().map(|t| t.0),
            end:          c.end().map(|t| t.0),
            wait:         c.wait_time(),
        }
    }
}
