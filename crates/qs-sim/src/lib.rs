//! `qs-sim` — tick-driven engine for a multi-server FIFO queue.
//!
//! # Tick loop
//!
//! ```text
//! step() at tick t:
//!   ① Arrival  — t == next_arrival && t < duration: new customer joins the
//!                queue tail; next_arrival = t + uniform(1, max_gap).
//!   ② Finish   — servers (ascending id) with service_end <= t release
//!                their customer.
//!   ③ Assign   — free servers (ascending id) take the queue head.
//!   ④ Finished — t >= duration and every server idle: stop here.
//!   ⑤ Credit   — total_busy += busy servers; t += 1.
//! ```
//!
//! The engine advances one minute per call rather than jumping to the next
//! event, so callers can interleave `step()` with rendering or other work.
//! Every call is synchronous and costs O(servers + queue).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_core::SimConfig;
//! use qs_sim::Sim;
//!
//! let mut sim = Sim::new(SimConfig::default())?;
//! sim.run();
//! println!("{:?}", sim.summary());
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use state::{CancelHandle, SimState};
