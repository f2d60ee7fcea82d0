//! Clarity Parser - YAML parser for import processor definitions
//!
//! Converts administrator-authored YAML documents into
//! [`ProcessorDefinition`] values. Condition strings are carried through
//! unparsed; the runtime parses them when it builds a processor.

pub mod definition;
pub mod error;
pub mod processor_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use definition::{ProcessorDefinition, ProcessorType};
pub use error::{ParseError, Result};
pub use processor_parser::ProcessorParser;
pub use yaml_parser::YamlParser;
