//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter; one tick is one
//! simulated minute.  Integer ticks keep all schedule arithmetic exact and
//! make hour bucketing a plain integer division.

use std::fmt;

/// Ticks per simulated hour.  Hour buckets are `tick / TICKS_PER_HOUR`.
pub const TICKS_PER_HOUR: u64 = 60;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick (minute) counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// The zero-based hour bucket this tick falls into.
    #[inline]
    pub fn hour(self) -> u64 {
        self.0 / TICKS_PER_HOUR
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T={}", self.0)
    }
}
