//! Error types for packaging.

use thiserror::Error;

/// Errors raised while packaging a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// The parallel input lists disagree in length
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    /// Groups could not be added to the output batch
    #[error("Output error: {0}")]
    Output(String),
}

impl From<group_types::GroupTypesError> for PackError {
    fn from(err: group_types::GroupTypesError) -> Self {
        PackError::Output(err.to_string())
    }
}
