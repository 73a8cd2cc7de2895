//! Deterministic random variate sources.
//!
//! # Determinism strategy
//!
//! The engine draws every random quantity (service durations and
//! inter-arrival gaps) through a single [`UniformSource`] it owns.  Two
//! implementations are provided:
//!
//! - [`SimRng`] wraps a `SmallRng` seeded from the run seed.  Replication
//!   `i` of a batch is seeded with [`derive_seed`]`(base, i)`:
//!
//!     seed = base_seed XOR (i * MIXING_CONSTANT)
//!
//!   The mixing constant is the 64-bit fractional part of the golden ratio,
//!   which spreads consecutive run indices uniformly across the seed space,
//!   so appending runs to a batch never disturbs the streams of earlier runs.
//! - [`ScriptedSource`] replays a fixed sequence of draws, for tests and for
//!   reproducing a recorded run exactly.
//!
//! Independent engines never share a source, so replications can run on
//! separate threads without synchronisation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed for replication `index` of a batch rooted at `base_seed`.
#[inline]
pub fn derive_seed(base_seed: u64, index: u64) -> u64 {
    base_seed ^ index.wrapping_mul(MIXING_CONSTANT)
}

// ── UniformSource ─────────────────────────────────────────────────────────────

/// Bounded-uniform integer sampling, the only distribution the engine uses.
pub trait UniformSource {
    /// Draw an integer uniformly from the inclusive range `low..=high`.
    ///
    /// Callers guarantee `low <= high`.
    fn uniform(&mut self, low: u64, high: u64) -> u64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        (**self).uniform(low, high)
    }
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    #[inline]
    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        (**self).uniform(low, high)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded pseudo-random source for one simulation run.
///
/// The type is `Send` so a run can be moved onto a worker thread, but it is
/// never shared: each engine owns its own stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl UniformSource for SimRng {
    #[inline]
    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        self.0.gen_range(low..=high)
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// Each scripted value is clamped into the requested range, so a script can
/// never produce a zero-length service or a zero gap.  An empty script always
/// returns `low`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    draws:  Vec<u64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<u64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// A source that always yields `value` (clamped per draw).
    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn uniform(&mut self, low: u64, high: u64) -> u64 {
        if self.draws.is_empty() {
            return low;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}
