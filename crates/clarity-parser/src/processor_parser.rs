//! Processor parser
//!
//! Parses YAML processor documents into [`ProcessorDefinition`] values.
//!
//! ```yaml
//! version: "0.1"
//! processor:
//!   id: geriatrics
//!   type: cohort
//!   priority: 10
//!   clinic: /Survey/ClinicMapping/123456789
//!   conditions:
//!     - AGE >= 65
//! ```

use crate::definition::{ProcessorDefinition, ProcessorType};
use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use serde_yaml::Value as YamlValue;

/// Top-level keys that may stand in a document of their own
const HEADER_KEYS: [&str; 1] = ["version"];

/// Processor parser
pub struct ProcessorParser;

impl ProcessorParser {
    /// Parse a single processor document
    pub fn parse(yaml_str: &str) -> Result<ProcessorDefinition> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse every processor document in a YAML string, preserving order.
    ///
    /// A document holding only file headers (`version:`) is skipped.
    pub fn parse_all(yaml_str: &str) -> Result<Vec<ProcessorDefinition>> {
        let definitions = YamlParser::parse_multi_document(yaml_str)?
            .iter()
            .filter(|doc| !Self::is_header_only(doc))
            .map(Self::parse_from_yaml)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Parsed {} processor definition(s)", definitions.len());
        Ok(definitions)
    }

    /// Parse a processor from a YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<ProcessorDefinition> {
        let processor = yaml.get("processor").ok_or_else(|| ParseError::MissingField {
            field: "processor".to_string(),
        })?;

        if !processor.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: "processor".to_string(),
                message: "expected a mapping".to_string(),
            });
        }

        let id = YamlParser::get_string(processor, "id").map_err(|e| match e {
            ParseError::MissingField { .. } => ParseError::MissingField {
                field: "processor.id".to_string(),
            },
            ParseError::InvalidValue { message, .. } => ParseError::InvalidValue {
                field: "processor.id".to_string(),
                message,
            },
            other => other,
        })?;
        let id = id.trim().to_string();
        if id.is_empty() {
            return Err(ParseError::InvalidValue {
                field: "processor.id".to_string(),
                message: "must not be blank".to_string(),
            });
        }

        let processor_type = YamlParser::get_string(processor, "type")
            .map_err(|e| Self::qualify(&id, e))?
            .parse::<ProcessorType>()
            .map_err(|message| Self::invalid(&id, "type", message))?;

        let priority =
            YamlParser::get_i32(processor, "priority").map_err(|e| Self::qualify(&id, e))?;

        let clinic =
            YamlParser::get_optional_string(processor, "clinic").map_err(|e| Self::qualify(&id, e))?;
        let clinic = match (processor_type, clinic) {
            (ProcessorType::Cohort, Some(clinic)) if !clinic.trim().is_empty() => {
                Some(clinic.trim().to_string())
            }
            (ProcessorType::Cohort, _) => {
                return Err(Self::invalid(
                    &id,
                    "clinic",
                    "cohort processors need a non-blank clinic".to_string(),
                ));
            }
            (ProcessorType::Discard, Some(_)) => {
                return Err(Self::invalid(
                    &id,
                    "clinic",
                    "discard processors do not assign a clinic".to_string(),
                ));
            }
            (ProcessorType::Discard, None) => None,
        };

        let description = YamlParser::get_optional_string(processor, "description")
            .map_err(|e| Self::qualify(&id, e))?;

        let conditions = YamlParser::get_string_list(processor, "conditions")
            .map_err(|e| Self::qualify(&id, e))?;

        Ok(ProcessorDefinition {
            id,
            processor_type,
            priority,
            clinic,
            description,
            conditions,
        })
    }

    fn is_header_only(doc: &YamlValue) -> bool {
        doc.as_mapping().is_some_and(|mapping| {
            !mapping.is_empty()
                && mapping
                    .keys()
                    .all(|key| key.as_str().is_some_and(|key| HEADER_KEYS.contains(&key)))
        })
    }

    /// Prefix a field error with the processor it belongs to
    fn qualify(id: &str, error: ParseError) -> ParseError {
        match error {
            ParseError::MissingField { field } => Self::missing(id, &field),
            ParseError::InvalidValue { field, message } => Self::invalid(id, &field, message),
            other => other,
        }
    }

    fn missing(id: &str, field: &str) -> ParseError {
        ParseError::MissingField {
            field: format!("processor[{}].{}", id, field),
        }
    }

    fn invalid(id: &str, field: &str, message: String) -> ParseError {
        ParseError::InvalidValue {
            field: format!("processor[{}].{}", id, field),
            message,
        }
    }
}
