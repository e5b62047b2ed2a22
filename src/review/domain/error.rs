//! Error types for review domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing review domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The review time is not a valid `HH:MM` value.
    #[error("invalid review time '{0}', expected HH:MM")]
    InvalidReviewTime(String),
}

/// Error returned while parsing review outcomes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review outcome: {0}")]
pub struct ParseReviewOutcomeError(pub String);
