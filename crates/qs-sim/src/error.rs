use qs_core::CoreError;
use thiserror::Error;

use crate::SimState;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("cannot move simulation from {from} to {to}")]
    InvalidTransition { from: SimState, to: SimState },
}

pub type SimResult<T> = Result<T, SimError>;
