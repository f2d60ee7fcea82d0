//! Runtime error types

use clarity_core::MalformedConditionError;
use thiserror::Error;

/// Errors raised while building processors and chains.
///
/// Processing a record never fails.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A configured condition could not be parsed
    #[error("Processor '{processor}' has a malformed condition: {source}")]
    MalformedCondition {
        processor: String,
        #[source]
        source: MalformedConditionError,
    },

    /// Two processors share an id
    #[error("Duplicate processor id: {0}")]
    DuplicateProcessor(String),

    /// Processor configuration is unusable
    #[error("Invalid processor '{processor}': {message}")]
    InvalidProcessor { processor: String, message: String },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
