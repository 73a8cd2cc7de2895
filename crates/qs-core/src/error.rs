//! Configuration error type shared by every `qs-*` crate.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while validating configuration values.
///
/// These are fatal at construction time.  Out-of-range values are rejected,
/// never clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {field} must be positive")]
    NonPositive { field: &'static str },

    #[error("configuration error: {field} = {value} is outside {expected}")]
    OutOfRange {
        field:    &'static str,
        value:    f64,
        expected: &'static str,
    },
}

/// Shorthand result type for `qs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
