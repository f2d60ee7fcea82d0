//! YAML Parser
//!
//! Provides utilities for parsing YAML content into structured data.

use crate::error::{ParseError, Result};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

/// Top-level key that starts a processor document
const DOCUMENT_KEY: &str = "processor:";

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Parse YAML string containing multiple documents
    ///
    /// Documents are separated by explicit `---` lines, or implicitly by a
    /// `processor:` key at column 0 (a `---` is inserted before each one).
    /// Empty documents are dropped.
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        let preprocessed = Self::preprocess_multi_document(yaml_str);

        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&preprocessed) {
            let value = YamlValue::deserialize(document)?;
            if !value.is_null() {
                documents.push(value);
            }
        }

        Ok(documents)
    }

    /// Insert `---` before every `processor:` at line start that is not the
    /// first one of its document
    fn preprocess_multi_document(yaml_str: &str) -> String {
        let mut result = String::with_capacity(yaml_str.len() + 64);
        let mut seen_definition = false;

        for line in yaml_str.lines() {
            let trimmed = line.trim();
            let is_definition_start = line.starts_with(DOCUMENT_KEY);

            if is_definition_start && seen_definition {
                result.push_str("---\n");
            }
            if is_definition_start {
                seen_definition = true;
            }

            result.push_str(line);
            result.push('\n');

            if trimmed == "---" {
                seen_definition = false;
            }
        }

        result
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        Self::get_optional_string(obj, field)?.ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    /// Get an optional string field from YAML object
    ///
    /// Numbers and booleans are accepted in their YAML spelling, so
    /// `clinic: 123456789` reads as `"123456789"`. Lists and mappings are
    /// an error.
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Result<Option<String>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(YamlValue::String(s)) => Ok(Some(s.clone())),
            Some(YamlValue::Number(n)) => Ok(Some(n.to_string())),
            Some(YamlValue::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a string, got {}", Self::describe(other)),
            }),
        }
    }

    /// Get a required i32 field from YAML object
    pub fn get_i32(obj: &YamlValue, field: &str) -> Result<i32> {
        let value = obj.get(field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })?;

        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a 32-bit integer, got {}", Self::describe(value)),
            })
    }

    /// Get an optional list of strings from YAML object
    ///
    /// A missing or null field yields an empty list; any non-string element
    /// is an error.
    pub fn get_string_list(obj: &YamlValue, field: &str) -> Result<Vec<String>> {
        let value = match obj.get(field) {
            None | Some(YamlValue::Null) => return Ok(Vec::new()),
            Some(v) => v,
        };

        let sequence = value.as_sequence().ok_or_else(|| ParseError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a list, got {}", Self::describe(value)),
        })?;

        sequence
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                item.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| ParseError::InvalidValue {
                        field: format!("{}[{}]", field, idx),
                        message: format!("expected a string, got {}", Self::describe(item)),
                    })
            })
            .collect()
    }

    /// Short description of a YAML value's kind for error messages
    fn describe(value: &YamlValue) -> &'static str {
        match value {
            YamlValue::Null => "null",
            YamlValue::Bool(_) => "a boolean",
            YamlValue::Number(_) => "a number",
            YamlValue::String(_) => "a string",
            YamlValue::Sequence(_) => "a list",
            YamlValue::Mapping(_) => "a mapping",
            YamlValue::Tagged(_) => "a tagged value",
        }
    }
}
