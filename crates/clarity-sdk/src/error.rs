//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] clarity_parser::ParseError),

    /// A definition file could not be parsed
    #[error("Invalid definition file '{path}': {source}")]
    InvalidDefinitionFile {
        path: String,
        #[source]
        source: clarity_parser::ParseError,
    },

    /// Chain construction error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] clarity_runtime::RuntimeError),

    /// A definition source failed to load
    #[error("Source error: {0}")]
    SourceError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Pipeline configuration YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
