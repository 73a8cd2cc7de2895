//! `qs-core` — foundational types for the `queuesim` workspace.
//!
//! This crate is a dependency of every other `qs-*` crate.  It intentionally
//! has no `qs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CustomerId`, `ServerId`                              |
//! | [`time`]        | `Tick`, `TICKS_PER_HOUR`                              |
//! | [`rng`]         | `UniformSource`, `SimRng`, `ScriptedSource`           |
//! | [`config`]      | `SimConfig`, `InsightThresholds`, `PatternConfig`     |
//! | [`customer`]    | `Customer`, `ServiceStatus`                           |
//! | [`server`]      | `Server`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod customer;
pub mod error;
pub mod ids;
pub mod rng;
pub mod server;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{InsightThresholds, PatternConfig, SimConfig};
pub use customer::{Customer, ServiceStatus};
pub use error::{CoreError, CoreResult};
pub use ids::{CustomerId, ServerId};
pub use rng::{ScriptedSource, SimRng, UniformSource, derive_seed};
pub use server::Server;
pub use time::{TICKS_PER_HOUR, Tick};
