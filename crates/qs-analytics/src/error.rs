use qs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("{summaries} run summaries do not line up with {reports} hourly reports")]
    Alignment { summaries: usize, reports: usize },

    #[error("pattern analysis needs at least one run")]
    EmptyBatch,

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
