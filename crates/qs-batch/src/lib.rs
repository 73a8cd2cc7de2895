//! `qs-batch` — replicated runs and cross-run pattern analysis.
//!
//! ```text
//! BatchConfig ──► run 0 (seed derive_seed(base, 0)) ─┐
//!             ──► run 1 (seed derive_seed(base, 1)) ─┼─► PatternEngine ──► BatchReport
//!             ──► …                                  ─┘
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//! | `serde`    | Adds `Serialize`/`Deserialize` to config and results.  |

pub mod config;
pub mod error;
pub mod runner;


pub use config::BatchConfig;
pub use error::{BatchError, BatchResult};
pub use runner::{BatchReport, Replicator, RunRecord, run_replications};
