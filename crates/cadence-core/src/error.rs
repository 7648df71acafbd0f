//! Agent error types.

use thiserror::Error;
use uuid::Uuid;

use cadence_llm::LLMError;

/// A record failed validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A score or rate fell outside [0, 1]
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A required field was empty
    #[error("{field} must not be empty")]
    Empty {
        /// Field name
        field: &'static str,
    },
}

/// Errors that can occur during agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The model call failed
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// A produced record failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The stage input was unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The model referenced an identifier that is not in the input
    #[error("Output references unknown id {0}")]
    UnknownId(Uuid),

    /// The model returned the wrong number of records for the input
    #[error("Output count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        /// Records expected
        expected: usize,
        /// Records returned
        actual: usize,
    },
}
