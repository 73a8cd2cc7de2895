use qs_analytics::AnalyticsError;
use qs_core::CoreError;
use qs_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BatchError {
    #[error("batch must contain at least one run")]
    NoRuns,

    #[error("batch cancelled: {stopped} of {runs} runs did not finish")]
    Cancelled { stopped: usize, runs: usize },

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

pub type BatchResult<T> = Result<T, BatchError>;
