//! Import filter example
//!
//! Loads processor definitions from YAML, filters a file of visit records
//! (one JSON object per line) and prints where each record ended up.
//!
//! Run with `RUST_LOG=clarity_sdk=debug` to see chain construction.

use clarity_core::Record;
use clarity_sdk::{CancellationFlag, ImportPipelineBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clarity_sdk=info,clarity_runtime=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let definitions = args
        .next()
        .unwrap_or_else(|| "demos/definitions/visits.yaml".to_string());
    let records = args.next().unwrap_or_else(|| "demos/visits.jsonl".to_string());

    let pipeline = ImportPipelineBuilder::new()
        .add_definition_file(definitions)
        .build()
        .await?;

    println!("=== Processor chain ===");
    for processor in pipeline.chain().processors() {
        println!("  [{}] {}", processor.priority(), processor.id());
    }

    let content = tokio::fs::read_to_string(&records).await?;
    let records = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str::<Record>)
        .collect::<Result<Vec<_>, _>>()?;

    println!("\n=== Traces ===");
    for record in &records {
        let id = record.get("VISIT_ID").cloned().unwrap_or_default();
        let (_, trace) = pipeline.process_with_trace(record.clone());
        println!("{}: {}", id, serde_json::to_string(&trace)?);
    }

    let result = pipeline.process_batch(records, &CancellationFlag::new());

    println!("\n=== Accepted ===");
    for record in &result.accepted {
        println!(
            "  {} -> {}",
            record.get("VISIT_ID").map(String::as_str).unwrap_or("?"),
            record.get("CLINIC").map(String::as_str).unwrap_or("(no clinic)")
        );
    }
    println!("\nSummary: {}", serde_json::to_string(&result.summary)?);

    Ok(())
}
