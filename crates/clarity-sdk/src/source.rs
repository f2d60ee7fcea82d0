//! Sources of processor definitions
//!
//! A pipeline keeps its sources so that a reload re-reads the same places.

use crate::error::{Result, SdkError};
use async_trait::async_trait;
use clarity_parser::{ProcessorDefinition, ProcessorParser};
use std::path::PathBuf;

/// Somewhere processor definitions can be loaded from
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Load every definition, in registration order
    async fn load(&self) -> Result<Vec<ProcessorDefinition>>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}

/// YAML definition files on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

#[async_trait]
impl DefinitionSource for FileSource {
    async fn load(&self) -> Result<Vec<ProcessorDefinition>> {
        let mut definitions = Vec::new();

        for path in &self.paths {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                SdkError::SourceError(format!("failed to read {}: {}", path.display(), e))
            })?;

            let parsed = ProcessorParser::parse_all(&content).map_err(|source| {
                SdkError::InvalidDefinitionFile {
                    path: path.display().to_string(),
                    source,
                }
            })?;

            tracing::debug!(
                "Loaded {} definition(s) from {}",
                parsed.len(),
                path.display()
            );
            definitions.extend(parsed);
        }

        Ok(definitions)
    }

    fn describe(&self) -> String {
        let paths: Vec<_> = self.paths.iter().map(|p| p.display().to_string()).collect();
        format!("files [{}]", paths.join(", "))
    }
}

/// YAML definition contents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    contents: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new(contents: Vec<(String, String)>) -> Self {
        Self { contents }
    }

    pub fn with_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents.push((id.into(), content.into()));
        self
    }
}

#[async_trait]
impl DefinitionSource for MemorySource {
    async fn load(&self) -> Result<Vec<ProcessorDefinition>> {
        let mut definitions = Vec::new();
        for (id, content) in &self.contents {
            let parsed = ProcessorParser::parse_all(content).map_err(|source| {
                SdkError::InvalidDefinitionFile {
                    path: id.clone(),
                    source,
                }
            })?;
            definitions.extend(parsed);
        }
        Ok(definitions)
    }

    fn describe(&self) -> String {
        let ids: Vec<_> = self.contents.iter().map(|(id, _)| id.as_str()).collect();
        format!("memory [{}]", ids.join(", "))
    }
}
