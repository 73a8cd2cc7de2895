//! Fluent builder for constructing a [`Sim`].

use std::collections::VecDeque;

use qs_core::{InsightThresholds, Server, ServerId, SimConfig, SimRng, Tick, UniformSource};

use crate::{CancelHandle, Sim, SimResult, SimState};

/// Fluent builder for [`Sim<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                          |
/// |---------------------------|----------------------------------|
/// | `.source(s)`              | `SimRng::new(config.seed)`       |
/// | `.insight_thresholds(t)`  | `InsightThresholds::default()`   |
/// | `.cancel_handle(h)`       | a fresh, untripped handle        |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .source(ScriptedSource::constant(1))
///     .build()?;
/// sim.run();
/// let summary = sim.summary();
/// ```
pub struct SimBuilder<R: UniformSource = SimRng> {
    config:  SimConfig,
    source:  R,
    insight: InsightThresholds,
    cancel:  Option<CancelHandle>,
}

impl SimBuilder<SimRng> {
    pub fn new(config: SimConfig) -> Self {
        let source = SimRng::new(config.seed);
        Self {
            config,
            source,
            insight: InsightThresholds::default(),
            cancel:  None,
        }
    }
}

impl<R: UniformSource> SimBuilder<R> {
    /// Replace the random variate source (e.g. with a `ScriptedSource`).
    pub fn source<S: UniformSource>(self, source: S) -> SimBuilder<S> {
        SimBuilder {
            config:  self.config,
            source,
            insight: self.insight,
            cancel:  self.cancel,
        }
    }

    pub fn insight_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.insight = thresholds;
        self
    }

    /// Share an existing cancellation handle, so one handle can stop several
    /// runs.
    pub fn cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Validate the configuration and return a `Ready` run whose first
    /// customer arrives at tick 0.
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;
        self.insight.validate()?;

        let servers = (0..self.config.server_count).map(|i| Server::new(ServerId(i))).collect();

        Ok(Sim {
            insight:      self.insight,
            source:       self.source,
            cancel:       self.cancel.unwrap_or_default(),
            state:        SimState::Ready,
            now:          Tick::ZERO,
            next_arrival: Tick::ZERO,
            customers:    Vec::new(),
            queue:        VecDeque::new(),
            servers,
            served:       Vec::new(),
            total_busy:   0,
            config:       self.config,
        })
    }
}
