//! Clarity SDK
//!
//! High-level API for filtering imported visits: load processor definitions
//! from YAML, build a processor chain, push records through it, and reload
//! the configuration without disturbing records already in flight.

pub mod builder;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;

// Re-export main types
pub use builder::ImportPipelineBuilder;
pub use config::PipelineConfig;
pub use error::{Result, SdkError};
pub use pipeline::{BatchResult, BatchSummary, CancellationFlag, ImportPipeline};
pub use source::{DefinitionSource, FileSource, MemorySource};

// Re-export commonly used types from dependencies
pub use clarity_core::Record;
pub use clarity_parser::{ProcessorDefinition, ProcessorType};
pub use clarity_runtime::{ChainTrace, ProcessorChain, RecordOutcome};
