//! Builder pattern for ImportPipeline

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::ImportPipeline;
use crate::source::{DefinitionSource, FileSource, MemorySource};
use std::path::PathBuf;

/// Builder for ImportPipeline
///
/// # Example
///
/// ```rust,ignore
/// use clarity_sdk::ImportPipelineBuilder;
///
/// let pipeline = ImportPipelineBuilder::new()
///     .add_definition_file("filters/discard.yaml")
///     .add_definition_file("filters/cohorts.yaml")
///     .build()
///     .await?;
///
/// let outcome = pipeline.process(record);
/// ```
///
/// Processors with equal priority run in registration order: configured
/// files first, then inline contents, then extra sources in the order
/// they were added.
#[derive(Default)]
pub struct ImportPipelineBuilder {
    config: PipelineConfig,
    sources: Vec<Box<dyn DefinitionSource>>,
}

impl ImportPipelineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a definition file
    pub fn add_definition_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.definition_files.push(path.into());
        self
    }

    /// Add multiple definition files
    pub fn add_definition_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.definition_files.extend(paths);
        self
    }

    /// Add definition content directly (alternative to file path)
    ///
    /// # Arguments
    /// * `id` - Name used in error messages
    /// * `content` - YAML content with one or more processor documents
    pub fn add_definition_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.config
            .definition_contents
            .push((id.into(), content.into()));
        self
    }

    /// Add a custom definition source
    pub fn with_source(mut self, source: impl DefinitionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Set the record column written by cohort processors
    pub fn with_cohort_field(mut self, field: impl Into<String>) -> Self {
        self.config.cohort_field = field.into();
        self
    }

    /// Build the pipeline
    pub async fn build(self) -> Result<ImportPipeline> {
        let mut sources: Vec<Box<dyn DefinitionSource>> = Vec::new();

        if !self.config.definition_files.is_empty() {
            sources.push(Box::new(FileSource::new(
                self.config.definition_files.clone(),
            )));
        }
        if !self.config.definition_contents.is_empty() {
            sources.push(Box::new(MemorySource::new(
                self.config.definition_contents.clone(),
            )));
        }
        sources.extend(self.sources);

        ImportPipeline::new(self.config, sources).await
    }
}
