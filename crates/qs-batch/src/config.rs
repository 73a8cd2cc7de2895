//! Batch configuration.

use qs_core::{InsightThresholds, PatternConfig, SimConfig};

use crate::{BatchError, BatchResult};

/// Everything needed to run and analyse a batch of replications.
///
/// `sim.seed` is the base seed; run `i` is seeded with
/// `qs_core::derive_seed(sim.seed, i)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchConfig {
    pub sim:     SimConfig,
    pub runs:    usize,
    pub insight: InsightThresholds,
    pub pattern: PatternConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sim:     SimConfig::default(),
            runs:    5,
            insight: InsightThresholds::default(),
            pattern: PatternConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> BatchResult<()> {
        if self.runs == 0 {
            return Err(BatchError::NoRuns);
        }
        self.sim.validate()?;
        self.insight.validate()?;
        self.pattern.validate()?;
        Ok(())
    }
}
