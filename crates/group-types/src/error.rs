//! Error types for the group data packager's shared types.

use thiserror::Error;

/// Unified error type for payload and settings handling.
#[derive(Debug, Error)]
pub enum GroupTypesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Units cannot be expressed as parallel lists
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    /// A push would break the positional pairing of groups and labels
    #[error("Misaligned output: {0}")]
    MisalignedOutput(String),
}
