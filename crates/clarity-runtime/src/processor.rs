//! Conditional processors
//!
//! A processor bundles an ordered list of conditions with an outcome. When
//! every condition matches (an empty list always matches) the outcome is
//! applied; otherwise the record passes through untouched.

use crate::error::{Result, RuntimeError};
use crate::evaluator::ConditionEvaluator;
use crate::outcome::RecordOutcome;
use crate::trace::{ProcessorAction, ProcessorTrace};
use clarity_core::{Condition, ConditionParser, Record};
use clarity_parser::{ProcessorDefinition, ProcessorType};

/// Record column written by cohort assignment unless configured otherwise
pub const DEFAULT_COHORT_FIELD: &str = "CLINIC";

/// Outcome strategy of a processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorKind {
    /// Writes `cohort` into `field` when all conditions match
    CohortAssigner { cohort: String, field: String },
    /// Discards the record when all conditions match
    DiscardFilter,
}

impl ProcessorKind {
    /// Cohort assignment into the default `CLINIC` column
    pub fn cohort(cohort: impl Into<String>) -> Self {
        ProcessorKind::CohortAssigner {
            cohort: cohort.into(),
            field: DEFAULT_COHORT_FIELD.to_string(),
        }
    }

    fn on_all_matched(&self, mut record: Record) -> (RecordOutcome, ProcessorAction) {
        match self {
            ProcessorKind::CohortAssigner { cohort, field } => {
                record.insert(field.clone(), cohort.clone());
                (
                    RecordOutcome::Accepted(record),
                    ProcessorAction::Assigned(cohort.clone()),
                )
            }
            ProcessorKind::DiscardFilter => (RecordOutcome::Discarded, ProcessorAction::Discarded),
        }
    }

    fn on_unmatched(&self, record: Record) -> (RecordOutcome, ProcessorAction) {
        match self {
            ProcessorKind::CohortAssigner { .. } | ProcessorKind::DiscardFilter => {
                (RecordOutcome::Accepted(record), ProcessorAction::PassedThrough)
            }
        }
    }
}

/// A prioritized rule: conditions plus an outcome
#[derive(Debug, Clone)]
pub struct ConditionalProcessor {
    id: String,
    priority: i32,
    conditions: Vec<Condition>,
    kind: ProcessorKind,
    description: Option<String>,
}

impl ConditionalProcessor {
    /// Build a processor from raw condition strings.
    ///
    /// Fails on the first malformed condition; a processor is never built
    /// with a clause silently dropped.
    pub fn new<S: AsRef<str>>(
        id: impl Into<String>,
        priority: i32,
        raw_conditions: &[S],
        kind: ProcessorKind,
    ) -> Result<Self> {
        let id = id.into();
        let conditions = ConditionParser::new()
            .parse_all(raw_conditions)
            .map_err(|source| RuntimeError::MalformedCondition {
                processor: id.clone(),
                source,
            })?;
        Self::with_conditions(id, priority, conditions, kind)
    }

    /// Build a processor from already parsed conditions
    pub fn with_conditions(
        id: impl Into<String>,
        priority: i32,
        conditions: Vec<Condition>,
        kind: ProcessorKind,
    ) -> Result<Self> {
        let id = id.into();
        if let ProcessorKind::CohortAssigner { cohort, field } = &kind {
            if cohort.trim().is_empty() || field.trim().is_empty() {
                return Err(RuntimeError::InvalidProcessor {
                    processor: id,
                    message: "cohort and cohort field must not be blank".to_string(),
                });
            }
        }

        Ok(Self {
            id,
            priority,
            conditions,
            kind,
            description: None,
        })
    }

    /// Cohort assigner writing to the default `CLINIC` column
    pub fn cohort_assigner<S: AsRef<str>>(
        id: impl Into<String>,
        priority: i32,
        raw_conditions: &[S],
        cohort: impl Into<String>,
    ) -> Result<Self> {
        Self::new(id, priority, raw_conditions, ProcessorKind::cohort(cohort))
    }

    pub fn discard_filter<S: AsRef<str>>(
        id: impl Into<String>,
        priority: i32,
        raw_conditions: &[S],
    ) -> Result<Self> {
        Self::new(id, priority, raw_conditions, ProcessorKind::DiscardFilter)
    }

    /// Build a processor from its configured definition
    pub fn from_definition(definition: &ProcessorDefinition, cohort_field: &str) -> Result<Self> {
        let kind = match definition.processor_type {
            ProcessorType::Cohort => {
                let cohort = definition.clinic.clone().ok_or_else(|| {
                    RuntimeError::InvalidProcessor {
                        processor: definition.id.clone(),
                        message: "cohort processor has no clinic".to_string(),
                    }
                })?;
                ProcessorKind::CohortAssigner {
                    cohort,
                    field: cohort_field.to_string(),
                }
            }
            ProcessorType::Discard => ProcessorKind::DiscardFilter,
        };

        let mut processor = Self::new(
            definition.id.clone(),
            definition.priority,
            &definition.conditions,
            kind,
        )?;
        processor.description = definition.description.clone();
        Ok(processor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn kind(&self) -> &ProcessorKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether every condition matches the record
    pub fn matches(&self, record: &Record) -> bool {
        ConditionEvaluator::evaluate_all(&self.conditions, record)
    }

    /// Apply this processor to a record
    pub fn apply(&self, record: Record) -> RecordOutcome {
        self.apply_with_trace(record).0
    }

    /// Apply this processor and describe what it did
    pub fn apply_with_trace(&self, record: Record) -> (RecordOutcome, ProcessorTrace) {
        let failed = ConditionEvaluator::first_unmatched(&self.conditions, &record);
        let matched = failed.is_none();
        let failed_condition = failed.map(|c| c.raw().to_string());

        let (outcome, action) = if matched {
            self.kind.on_all_matched(record)
        } else {
            self.kind.on_unmatched(record)
        };

        tracing::debug!(
            processor = %self.id,
            priority = self.priority,
            matched,
            ?action,
            "processor applied"
        );

        let trace = ProcessorTrace {
            processor_id: self.id.clone(),
            priority: self.priority,
            matched,
            action,
            failed_condition,
        };
        (outcome, trace)
    }
}
