//! Processor chain
//!
//! Runs a record through every processor in ascending priority order.
//! Processors with equal priority keep their registration order. A discard
//! ends the run; later processors never see the record.

use crate::error::{Result, RuntimeError};
use crate::outcome::RecordOutcome;
use crate::processor::ConditionalProcessor;
use crate::trace::ChainTrace;
use clarity_core::Record;
use clarity_parser::ProcessorDefinition;
use std::collections::HashSet;

/// Ordered, immutable set of processors
#[derive(Debug, Clone, Default)]
pub struct ProcessorChain {
    processors: Vec<ConditionalProcessor>,
}

impl ProcessorChain {
    /// Create a chain, ordering processors by ascending priority
    pub fn new(mut processors: Vec<ConditionalProcessor>) -> Self {
        // stable: equal priorities keep registration order
        processors.sort_by_key(ConditionalProcessor::priority);
        Self { processors }
    }

    /// A chain that accepts every record unchanged
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a chain from configured definitions.
    ///
    /// The whole configuration is rejected if any processor fails to build
    /// or two processors share an id.
    pub fn from_definitions(definitions: &[ProcessorDefinition], cohort_field: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut processors = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if !seen.insert(definition.id.as_str()) {
                return Err(RuntimeError::DuplicateProcessor(definition.id.clone()));
            }
            processors.push(ConditionalProcessor::from_definition(definition, cohort_field)?);
        }

        let chain = Self::new(processors);
        tracing::info!("Built processor chain with {} processor(s)", chain.len());
        Ok(chain)
    }

    /// Push a record through the chain
    pub fn run(&self, record: Record) -> RecordOutcome {
        let mut current = record;
        for processor in &self.processors {
            match processor.apply(current) {
                RecordOutcome::Accepted(next) => current = next,
                RecordOutcome::Discarded => {
                    tracing::debug!(processor = %processor.id(), "record discarded");
                    return RecordOutcome::Discarded;
                }
            }
        }
        RecordOutcome::Accepted(current)
    }

    /// Push a record through the chain, recording what each processor did
    pub fn run_with_trace(&self, record: Record) -> (RecordOutcome, ChainTrace) {
        let mut trace = ChainTrace::new();
        let mut current = record;

        for processor in &self.processors {
            let (outcome, processor_trace) = processor.apply_with_trace(current);
            trace.push(processor_trace);
            match outcome {
                RecordOutcome::Accepted(next) => current = next,
                RecordOutcome::Discarded => return (RecordOutcome::Discarded, trace),
            }
        }

        (RecordOutcome::Accepted(current), trace)
    }

    /// Processors in execution order
    pub fn processors(&self) -> &[ConditionalProcessor] {
        &self.processors
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}
