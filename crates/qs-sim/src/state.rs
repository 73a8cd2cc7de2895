//! Run lifecycle and cooperative cancellation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle of one run.
///
/// Transitions are monotonic: `Ready → Running → (Finished | Stopped)`, plus
/// `Ready → Stopped` for a run cancelled before its first tick.  The engine
/// owns the field; callers change it only through `step()` and `cancel()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimState {
    Ready,
    Running,
    Finished,
    Stopped,
}

impl SimState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SimState::Finished | SimState::Stopped)
    }

    /// Whether `self → next` is a legal transition.
    pub fn can_become(self, next: SimState) -> bool {
        matches!(
            (self, next),
            (SimState::Ready, SimState::Running)
                | (SimState::Ready, SimState::Stopped)
                | (SimState::Running, SimState::Finished)
                | (SimState::Running, SimState::Stopped)
        )
    }
}

impl fmt::Display for SimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SimState::Ready    => "ready",
            SimState::Running  => "running",
            SimState::Finished => "finished",
            SimState::Stopped  => "stopped",
        })
    }
}

// ── CancelHandle ──────────────────────────────────────────────────────────────

/// Shareable cancellation flag.
///
/// Tripping the handle never interrupts a tick in progress: the engine checks
/// it at the start of the next `step()` and moves to `Stopped` there.
/// Records produced before that point are kept.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
