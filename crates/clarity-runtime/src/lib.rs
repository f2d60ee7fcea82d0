//! Clarity Runtime - Conditional processing of imported visits
//!
//! Each imported visit record is pushed through a [`ProcessorChain`]: an
//! ordered list of [`ConditionalProcessor`]s that either assign a cohort to
//! the record, discard it, or pass it through unchanged.
//!
//! Chains are immutable once built and can be shared between threads.

pub mod chain;
pub mod error;
pub mod evaluator;
pub mod outcome;
pub mod processor;
pub mod trace;

// Re-export main types
pub use chain::ProcessorChain;
pub use error::{Result, RuntimeError};
pub use evaluator::ConditionEvaluator;
pub use outcome::RecordOutcome;
pub use processor::{ConditionalProcessor, ProcessorKind, DEFAULT_COHORT_FIELD};
pub use trace::{ChainTrace, ProcessorAction, ProcessorTrace};

pub use clarity_core::{Condition, Record};
