//! Import pipeline
//!
//! Holds the currently published [`ProcessorChain`] and processes records
//! against it. A reload builds a complete new chain first and only then
//! swaps the published reference, so a record is always processed by one
//! fully formed chain.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::source::DefinitionSource;
use clarity_core::Record;
use clarity_runtime::{ChainTrace, ProcessorChain, RecordOutcome};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Cooperative cancellation for batch runs, checked between records
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Records taken from the input
    pub processed: usize,
    pub accepted: usize,
    pub discarded: usize,
    /// The run stopped early because of cancellation
    pub cancelled: bool,
}

/// Output of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Surviving records, in input order
    pub accepted: Vec<Record>,
    pub summary: BatchSummary,
}

/// Filters imported visits through the configured processor chain
pub struct ImportPipeline {
    chain: RwLock<Arc<ProcessorChain>>,
    sources: Vec<Box<dyn DefinitionSource>>,
    config: PipelineConfig,
}

impl ImportPipeline {
    /// Load every source and build the initial chain
    pub async fn new(config: PipelineConfig, sources: Vec<Box<dyn DefinitionSource>>) -> Result<Self> {
        config.validate()?;
        let chain = Self::build_chain(&config, &sources).await?;
        tracing::info!(
            "Import pipeline ready with {} processor(s) from {} source(s)",
            chain.len(),
            sources.len()
        );

        Ok(Self {
            chain: RwLock::new(Arc::new(chain)),
            sources,
            config,
        })
    }

    /// Wrap an already built chain; `reload` re-reads nothing and keeps it
    pub fn from_chain(chain: ProcessorChain) -> Self {
        Self {
            chain: RwLock::new(Arc::new(chain)),
            sources: Vec::new(),
            config: PipelineConfig::new(),
        }
    }

    async fn build_chain(
        config: &PipelineConfig,
        sources: &[Box<dyn DefinitionSource>],
    ) -> Result<ProcessorChain> {
        let mut definitions = Vec::new();
        for source in sources {
            let loaded = source.load().await?;
            tracing::debug!("{}: {} definition(s)", source.describe(), loaded.len());
            definitions.extend(loaded);
        }
        Ok(ProcessorChain::from_definitions(&definitions, &config.cohort_field)?)
    }

    /// Snapshot of the currently published chain
    pub fn chain(&self) -> Arc<ProcessorChain> {
        // the guarded value is a single Arc, so a poisoned lock still holds a whole chain
        self.chain
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, chain: ProcessorChain) {
        let chain = Arc::new(chain);
        *self.chain.write().unwrap_or_else(PoisonError::into_inner) = chain;
    }

    pub fn processor_count(&self) -> usize {
        self.chain().len()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one record
    pub fn process(&self, record: Record) -> RecordOutcome {
        self.chain().run(record)
    }

    /// Process one record and report what each processor did
    pub fn process_with_trace(&self, record: Record) -> (RecordOutcome, ChainTrace) {
        self.chain().run_with_trace(record)
    }

    /// Process records one at a time against a single chain snapshot.
    ///
    /// Cancellation is checked before each record; once cancelled the
    /// remaining input is left unconsumed.
    pub fn process_batch<I>(&self, records: I, cancel: &CancellationFlag) -> BatchResult
    where
        I: IntoIterator<Item = Record>,
    {
        let chain = self.chain();
        let mut result = BatchResult::default();

        for record in records {
            if cancel.is_cancelled() {
                result.summary.cancelled = true;
                break;
            }

            result.summary.processed += 1;
            match chain.run(record) {
                RecordOutcome::Accepted(record) => {
                    result.summary.accepted += 1;
                    result.accepted.push(record);
                }
                RecordOutcome::Discarded => result.summary.discarded += 1,
            }
        }

        tracing::debug!(
            processed = result.summary.processed,
            accepted = result.summary.accepted,
            discarded = result.summary.discarded,
            cancelled = result.summary.cancelled,
            "batch finished"
        );
        result
    }

    /// Reload every source and publish a freshly built chain.
    ///
    /// On error the previously published chain stays in place.
    /// Returns the number of processors in the new chain.
    pub async fn reload(&self) -> Result<usize> {
        if self.sources.is_empty() {
            tracing::info!("No definition sources configured, keeping current chain");
            return Ok(self.processor_count());
        }

        tracing::info!("Reloading processor definitions...");
        match Self::build_chain(&self.config, &self.sources).await {
            Ok(chain) => {
                let count = chain.len();
                self.publish(chain);
                tracing::info!("✓ Processor chain reloaded: {} processor(s)", count);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Reload rejected, keeping current chain: {}", e);
                Err(e)
            }
        }
    }
}
