//! Unit tests for processor definition parsing
//!
//! Covers single and multi-document files and the validation rules for
//! cohort and discard processors.

use clarity_parser::*;

// =============================================================================
// Definition Parsing
// =============================================================================

#[test]
fn test_parse_cohort_processor() {
    let yaml = r#"
version: "0.1"

processor:
  id: geriatrics
  type: cohort
  priority: 10
  clinic: /Survey/ClinicMapping/123456789
  description: Seniors outside pediatrics
  conditions:
    - AGE >= 65
    - "DEPT not in PEDS; NICU"
"#;

    let result = ProcessorParser::parse(yaml);
    assert!(result.is_ok(), "Failed to parse processor: {:?}", result.err());

    let def = result.unwrap();
    assert_eq!(def.id, "geriatrics");
    assert_eq!(def.processor_type, ProcessorType::Cohort);
    assert_eq!(def.priority, 10);
    assert_eq!(def.clinic.as_deref(), Some("/Survey/ClinicMapping/123456789"));
    assert_eq!(def.description.as_deref(), Some("Seniors outside pediatrics"));
    assert_eq!(def.conditions, vec!["AGE >= 65", "DEPT not in PEDS; NICU"]);
}

#[test]
fn test_parse_discard_processor_without_conditions() {
    let yaml = r#"
processor:
  id: drop_all
  type: DISCARD
  priority: -1
"#;

    let def = ProcessorParser::parse(yaml).unwrap();
    assert_eq!(def.processor_type, ProcessorType::Discard);
    assert_eq!(def.priority, -1);
    assert!(def.clinic.is_none());
    assert!(def.conditions.is_empty());
}

#[test]
fn test_parse_all_implicit_documents() {
    let yaml = r#"
processor:
  id: first
  type: discard
  priority: 1
  conditions:
    - STATUS = cancelled
processor:
  id: second
  type: cohort
  priority: 2
  clinic: /Survey/ClinicMapping/1
---
processor:
  id: third
  type: discard
  priority: 3
"#;

    let defs = ProcessorParser::parse_all(yaml).unwrap();
    let ids: Vec<_> = defs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_parse_all_empty_content() {
    assert!(ProcessorParser::parse_all("").unwrap().is_empty());
    assert!(ProcessorParser::parse_all("---\n---\n").unwrap().is_empty());
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_cohort_requires_clinic() {
    let yaml = r#"
processor:
  id: no_clinic
  type: cohort
  priority: 1
"#;

    match ProcessorParser::parse(yaml) {
        Err(ParseError::InvalidValue { field, .. }) => {
            assert_eq!(field, "processor[no_clinic].clinic")
        }
        other => panic!("Expected invalid clinic, got {:?}", other),
    }
}

#[test]
fn test_discard_rejects_clinic() {
    let yaml = r#"
processor:
  id: drop
  type: discard
  priority: 1
  clinic: /Survey/ClinicMapping/1
"#;

    assert!(matches!(
        ProcessorParser::parse(yaml),
        Err(ParseError::InvalidValue { .. })
    ));
}

#[test]
fn test_missing_priority() {
    let yaml = r#"
processor:
  id: drop
  type: discard
"#;

    match ProcessorParser::parse(yaml) {
        Err(ParseError::MissingField { field }) => assert_eq!(field, "processor[drop].priority"),
        other => panic!("Expected missing priority, got {:?}", other),
    }
}

#[test]
fn test_unknown_type() {
    let yaml = r#"
processor:
  id: odd
  type: reroute
  priority: 1
"#;

    let err = ProcessorParser::parse(yaml).unwrap_err();
    assert!(err.to_string().contains("processor[odd].type"));
}

#[test]
fn test_missing_processor_key() {
    let yaml = r#"
rule:
  id: not_a_processor
"#;

    assert!(matches!(
        ProcessorParser::parse(yaml),
        Err(ParseError::MissingField { .. })
    ));
}

#[test]
fn test_invalid_yaml() {
    assert!(matches!(
        ProcessorParser::parse("processor: [unclosed"),
        Err(ParseError::YamlError(_))
    ));
}

#[test]
fn test_conditions_are_not_validated_here() {
    // condition syntax is checked when the chain is built
    let yaml = r#"
processor:
  id: later
  type: discard
  priority: 1
  conditions:
    - AGE >= old
"#;

    let def = ProcessorParser::parse(yaml).unwrap();
    assert_eq!(def.conditions, vec!["AGE >= old"]);
}
