//! Clarity Core - Core types for the Clarity visit import filters
//!
//! This crate provides the fundamental types used across the import pipeline:
//! - Record type for imported visit rows
//! - Condition language (operators, parsed conditions, parser)
//! - Error types

pub mod condition;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use condition::{Condition, ConditionParser, Operand, Operator};
pub use error::MalformedConditionError;
pub use types::Record;
