//! Configuration types for ImportPipeline

use crate::error::{Result, SdkError};
use clarity_runtime::DEFAULT_COHORT_FIELD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_cohort_field() -> String {
    DEFAULT_COHORT_FIELD.to_string()
}

/// Pipeline configuration
///
/// ```yaml
/// definition_files:
///   - filters/discard.yaml
///   - filters/cohorts.yaml
/// cohort_field: CLINIC
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Processor definition files, loaded in order
    #[serde(default)]
    pub definition_files: Vec<PathBuf>,

    /// Definition contents (id, yaml) - alternative to file paths
    #[serde(skip)]
    pub definition_contents: Vec<(String, String)>,

    /// Record column written by cohort processors
    #[serde(default = "default_cohort_field")]
    pub cohort_field: String,
}

impl PipelineConfig {
    /// Create a new pipeline configuration
    pub fn new() -> Self {
        Self {
            definition_files: Vec::new(),
            definition_contents: Vec::new(),
            cohort_field: default_cohort_field(),
        }
    }

    /// Parse a configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// Relative definition paths are resolved against the configuration
    /// file's directory.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SdkError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_yaml_str(&content)?;
        if let Some(base) = path.parent() {
            config.definition_files = config
                .definition_files
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }
        Ok(config)
    }

    /// Add a definition file
    pub fn with_definition_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.definition_files.push(path.into());
        self
    }

    /// Add definition content
    pub fn with_definition_content(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.definition_contents.push((id.into(), content.into()));
        self
    }

    /// Set the column written by cohort processors
    pub fn with_cohort_field(mut self, field: impl Into<String>) -> Self {
        self.cohort_field = field.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cohort_field.trim().is_empty() {
            return Err(SdkError::ConfigError(
                "cohort_field must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
