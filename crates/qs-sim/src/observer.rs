//! Simulation observer trait for progress reporting and rendering.

use qs_core::Tick;

use crate::{Event, SimState};

/// Callbacks invoked by [`Sim::run_with`][crate::Sim::run_with] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — live log
///
/// ```rust,ignore
/// struct EventPrinter;
///
/// impl SimObserver for EventPrinter {
///     fn on_events(&mut self, _tick: Tick, events: &[Event]) {
///         for e in events {
///             println!("{e}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each `step()`.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called with the events of each tick, in emission order.  Not called
    /// for ticks that produced no events.
    fn on_events(&mut self, _tick: Tick, _events: &[Event]) {}

    /// Called after each `step()` with the number of servers busy at tick
    /// end.
    fn on_tick_end(&mut self, _tick: Tick, _busy_servers: usize) {}

    /// Called once when the run reaches a terminal state.
    fn on_sim_end(&mut self, _final_tick: Tick, _state: SimState) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
