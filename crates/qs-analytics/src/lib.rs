//! `qs-analytics` — pure transforms from finished runs to statistics.
//!
//! ```text
//! &[Customer] ──► SummaryCalculator ──► RunSummary   ─┐
//!             └─► HourlyAnalyzer    ──► HourlyReport ─┴─► PatternEngine ──► PatternSet
//!                                                         (N runs)          + suggestions
//! ```
//!
//! Nothing here touches the engine: inputs are plain customer records and
//! busy-time counters, outputs are owned snapshots.  Every ratio guards its
//! zero denominator and documents the value it falls back to.

pub mod error;
pub mod hourly;
pub mod pattern;
pub mod summary;


pub use error::{AnalyticsError, AnalyticsResult};
pub use hourly::{HourBucket, HourlyAnalyzer, HourlyReport};
pub use pattern::{PatternEngine, PatternSet, Suggestion};
pub use summary::{BusyTime, InsightTier, RunSummary, SummaryCalculator, SummaryStatus};
