//! Per-record processing traces
//!
//! Traces describe how a record moved through a chain. They are diagnostic
//! only and never influence the outcome.

use serde::Serialize;

/// Action a processor took on a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "cohort", rename_all = "snake_case")]
pub enum ProcessorAction {
    /// A cohort was written to the record
    Assigned(String),
    /// The record was discarded
    Discarded,
    /// The record continued unchanged
    PassedThrough,
}

/// Trace of one processor run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorTrace {
    pub processor_id: String,
    pub priority: i32,
    /// Whether all conditions matched
    pub matched: bool,
    pub action: ProcessorAction,
    /// Raw text of the first condition that did not match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_condition: Option<String>,
}

/// Trace of a whole chain run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainTrace {
    pub processors: Vec<ProcessorTrace>,
}

impl ChainTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trace: ProcessorTrace) {
        self.processors.push(trace);
    }

    /// Id of the processor that discarded the record, if any
    pub fn discarded_by(&self) -> Option<&str> {
        self.processors
            .iter()
            .find(|t| t.action == ProcessorAction::Discarded)
            .map(|t| t.processor_id.as_str())
    }

    /// The cohort that ended up on the record, i.e. the last assignment
    pub fn assigned_cohort(&self) -> Option<&str> {
        self.processors.iter().rev().find_map(|t| match &t.action {
            ProcessorAction::Assigned(cohort) => Some(cohort.as_str()),
            _ => None,
        })
    }

    /// Ids of the processors that ran, in order
    pub fn executed(&self) -> Vec<&str> {
        self.processors
            .iter()
            .map(|t| t.processor_id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(id: &str, action: ProcessorAction) -> ProcessorTrace {
        ProcessorTrace {
            processor_id: id.to_string(),
            priority: 0,
            matched: action != ProcessorAction::PassedThrough,
            action,
            failed_condition: None,
        }
    }

    #[test]
    fn test_last_assignment_wins() {
        let mut chain = ChainTrace::new();
        chain.push(trace("a", ProcessorAction::Assigned("ER".to_string())));
        chain.push(trace("b", ProcessorAction::PassedThrough));
        chain.push(trace("c", ProcessorAction::Assigned("ICU".to_string())));

        assert_eq!(chain.assigned_cohort(), Some("ICU"));
        assert_eq!(chain.discarded_by(), None);
        assert_eq!(chain.executed(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trace_serializes_action() {
        let json = serde_json::to_value(trace("a", ProcessorAction::Assigned("ER".to_string()))).unwrap();
        assert_eq!(json["action"]["action"], "assigned");
        assert_eq!(json["action"]["cohort"], "ER");

        let json = serde_json::to_value(trace("b", ProcessorAction::Discarded)).unwrap();
        assert_eq!(json["action"]["action"], "discarded");
        assert!(json.get("failed_condition").is_none());
    }
}
