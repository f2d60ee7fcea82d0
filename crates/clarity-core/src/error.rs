//! Error types for Clarity Core

use thiserror::Error;

/// Raised when a raw condition string cannot be turned into a [`Condition`].
///
/// Only ever produced while loading configuration. Evaluating a condition
/// against a record never fails.
///
/// [`Condition`]: crate::condition::Condition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed condition '{condition}': {reason}")]
pub struct MalformedConditionError {
    /// The raw condition text as configured
    pub condition: String,
    /// Why it was rejected
    pub reason: String,
}

impl MalformedConditionError {
    pub fn new(condition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MalformedConditionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MalformedConditionError::new("AGE >= old", "operand 'old' is not a number");
        let message = error.to_string();
        assert!(message.contains("AGE >= old"));
        assert!(message.contains("is not a number"));
    }
}
