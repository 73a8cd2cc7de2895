//! Replication runner.
//!
//! Each run gets its own engine and its own RNG stream, so runs share no
//! mutable state.  With the `parallel` feature they execute on Rayon's pool;
//! either way results come back in run-index order.

use qs_analytics::{HourlyReport, PatternEngine, PatternSet, RunSummary};
use qs_core::{Customer, SimConfig, derive_seed};
use qs_sim::{CancelHandle, SimBuilder, SimState};

use crate::{BatchConfig, BatchError, BatchResult};

/// Results of one replication.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub index:     usize,
    pub seed:      u64,
    pub state:     SimState,
    pub summary:   RunSummary,
    /// `HourlyReport::empty` when nobody arrived.
    pub hourly:    HourlyReport,
    pub customers: Vec<Customer>,
}

/// Results of a whole batch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchReport {
    pub runs:        Vec<RunRecord>,
    pub patterns:    PatternSet,
    pub suggestions: Vec<String>,
}

impl BatchReport {
    pub fn last_run(&self) -> Option<&RunRecord> {
        self.runs.last()
    }
}

/// Runs a batch of replications and analyses them.
///
/// # Example
///
/// ```rust,ignore
/// let report = Replicator::new(BatchConfig::default()).run()?;
/// for line in &report.suggestions {
///     println!("{line}");
/// }
/// ```
pub struct Replicator {
    config: BatchConfig,
    cancel: CancelHandle,
}

impl Replicator {
    pub fn new(config: BatchConfig) -> Self {
        Self { config, cancel: CancelHandle::new() }
    }

    /// Share a cancellation handle with every run of the batch.
    pub fn cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancel = handle;
        self
    }

    pub fn run(&self) -> BatchResult<BatchReport> {
        self.config.validate()?;
        let runs = self.config.runs;
        log::info!(
            "starting {runs} runs: duration={} servers={} base_seed={}",
            self.config.sim.duration,
            self.config.sim.server_count,
            self.config.sim.seed,
        );

        let records = self.run_all()?;

        let stopped = records.iter().filter(|r| r.state != SimState::Finished).count();
        if stopped > 0 {
            log::warn!("{stopped} of {runs} runs were cancelled; skipping pattern analysis");
            return Err(BatchError::Cancelled { stopped, runs });
        }

        let summaries = records.iter().map(|r| r.summary.clone()).collect();
        let reports = records.iter().map(|r| r.hourly.clone()).collect();
        let engine = PatternEngine::new(summaries, reports, self.config.pattern)?;
        let patterns = engine.analyze();
        let suggestions = patterns.suggestions.iter().map(ToString::to_string).collect();

        log::info!(
            "batch complete: avg utilization {:.1}%, avg wait {:.2} min",
            patterns.avg_utilization,
            patterns.avg_wait_time,
        );
        Ok(BatchReport { runs: records, patterns, suggestions })
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self) -> BatchResult<Vec<RunRecord>> {
        (0..self.config.runs).map(|i| self.run_one(i)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_all(&self) -> BatchResult<Vec<RunRecord>> {
        use rayon::prelude::*;

        // `collect` on an indexed parallel iterator preserves run order.
        (0..self.config.runs).into_par_iter().map(|i| self.run_one(i)).collect()
    }

    fn run_one(&self, index: usize) -> BatchResult<RunRecord> {
        let seed = derive_seed(self.config.sim.seed, index as u64);
        let sim_config = SimConfig { seed, ..self.config.sim.clone() };
        let (duration, threshold) = (sim_config.duration, sim_config.stress_threshold);

        let mut sim = SimBuilder::new(sim_config)
            .insight_thresholds(self.config.insight)
            .cancel_handle(self.cancel.clone())
            .build()?;
        let state = sim.run();
        log::debug!("run {index} (seed {seed}) ended {state} after {} ticks", sim.elapsed_ticks());

        Ok(RunRecord {
            index,
            seed,
            state,
            summary: sim.get_summary(threshold),
            hourly: sim
                .get_hourly_report(duration, threshold)
                .unwrap_or_else(|| HourlyReport::empty(duration, threshold)),
            customers: sim.customers().to_vec(),
        })
    }
}

/// Run `config` with a fresh cancellation handle.
pub fn run_replications(config: &BatchConfig) -> BatchResult<BatchReport> {
    Replicator::new(config.clone()).run()
}
