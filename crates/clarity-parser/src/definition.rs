//! Processor definitions as authored in configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of outcome a processor applies when all its conditions match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorType {
    /// Assign the configured clinic to the visit
    Cohort,
    /// Drop the visit from the import
    Discard,
}

impl ProcessorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorType::Cohort => "cohort",
            ProcessorType::Discard => "discard",
        }
    }
}

impl fmt::Display for ProcessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cohort" => Ok(ProcessorType::Cohort),
            "discard" => Ok(ProcessorType::Discard),
            other => Err(format!(
                "unknown processor type '{}', expected 'cohort' or 'discard'",
                other
            )),
        }
    }
}

/// One configured processor, before its conditions are parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorDefinition {
    /// Unique processor identifier
    pub id: String,

    /// Outcome kind
    #[serde(rename = "type")]
    pub processor_type: ProcessorType,

    /// Processors run in ascending priority order
    pub priority: i32,

    /// Clinic assigned by cohort processors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,

    /// Free-text description, only used for logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw condition strings, all of which must match
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl ProcessorDefinition {
    /// Create a cohort assignment definition
    pub fn cohort(
        id: impl Into<String>,
        priority: i32,
        clinic: impl Into<String>,
        conditions: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            processor_type: ProcessorType::Cohort,
            priority,
            clinic: Some(clinic.into()),
            description: None,
            conditions,
        }
    }

    /// Create a discard filter definition
    pub fn discard(id: impl Into<String>, priority: i32, conditions: Vec<String>) -> Self {
        Self {
            id: id.into(),
            processor_type: ProcessorType::Discard,
            priority,
            clinic: None,
            description: None,
            conditions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
