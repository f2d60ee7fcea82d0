//! Integration tests for the import pipeline
//!
//! Tests that definitions flow from YAML files through chain construction,
//! record processing and reload.

use clarity_core::types::record::from_pairs;
use clarity_sdk::{
    CancellationFlag, ImportPipelineBuilder, MemorySource, PipelineConfig, RecordOutcome,
    SdkError,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const DISCARD_YAML: &str = r#"
version: "0.1"
processor:
  id: cancelled
  type: discard
  priority: 5
  description: Drop cancelled visits
  conditions:
    - STATUS = cancelled
"#;

const COHORT_YAML: &str = r#"
processor:
  id: geriatrics
  type: cohort
  priority: 10
  clinic: /Survey/ClinicMapping/123456789
  conditions:
    - AGE >= 65
    - DEPT not in PEDS; NICU
processor:
  id: emergency
  type: cohort
  priority: 20
  clinic: /Survey/ClinicMapping/987654321
  conditions:
    - DEPT = ER
"#;

async fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    tokio::fs::write(&path, content).await.unwrap();
    path
}

async fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let discard = write(dir.path(), "discard.yaml", DISCARD_YAML).await;
    let cohorts = write(dir.path(), "cohorts.yaml", COHORT_YAML).await;
    (dir, discard, cohorts)
}

#[tokio::test]
async fn test_pipeline_from_files() {
    let (_dir, discard, cohorts) = setup().await;

    let pipeline = ImportPipelineBuilder::new()
        .add_definition_file(cohorts)
        .add_definition_file(discard)
        .build()
        .await
        .unwrap();

    let ids: Vec<_> = pipeline
        .chain()
        .processors()
        .iter()
        .map(|p| p.id().to_string())
        .collect();
    assert_eq!(ids, vec!["cancelled", "geriatrics", "emergency"]);

    let outcome = pipeline.process(from_pairs([("STATUS", "Cancelled"), ("AGE", "80")]));
    assert_eq!(outcome, RecordOutcome::Discarded);

    let record = pipeline
        .process(from_pairs([("STATUS", "booked"), ("AGE", "80"), ("DEPT", "ER")]))
        .into_record()
        .unwrap();
    assert_eq!(
        record.get("CLINIC").map(String::as_str),
        Some("/Survey/ClinicMapping/987654321")
    );

    let (_, trace) = pipeline.process_with_trace(from_pairs([("AGE", "3"), ("DEPT", "PEDS")]));
    assert_eq!(trace.executed(), vec!["cancelled", "geriatrics", "emergency"]);
    assert_eq!(trace.assigned_cohort(), None);
    assert_eq!(trace.processors[1].failed_condition.as_deref(), Some("AGE >= 65"));
}

#[tokio::test]
async fn test_pipeline_from_config_file() {
    let (dir, _discard, _cohorts) = setup().await;
    let config_path = write(
        dir.path(),
        "pipeline.yaml",
        "definition_files:\n  - discard.yaml\n  - cohorts.yaml\ncohort_field: COHORT\n",
    )
    .await;

    let config = PipelineConfig::from_file(&config_path).await.unwrap();
    let pipeline = ImportPipelineBuilder::new()
        .with_config(config)
        .build()
        .await
        .unwrap();

    let record = pipeline
        .process(from_pairs([("AGE", "70"), ("DEPT", "MED")]))
        .into_record()
        .unwrap();
    assert_eq!(
        record.get("COHORT").map(String::as_str),
        Some("/Survey/ClinicMapping/123456789")
    );
    assert!(record.get("CLINIC").is_none());
}

#[tokio::test]
async fn test_malformed_condition_rejects_configuration() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "bad.yaml",
        "processor:\n  id: bad\n  type: discard\n  priority: 1\n  conditions:\n    - AGE >= sixty\n",
    )
    .await;

    let result = ImportPipelineBuilder::new().add_definition_file(path).build().await;
    match result {
        Err(SdkError::RuntimeError(e)) => assert!(e.to_string().contains("bad")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("malformed condition accepted"),
    }
}

#[tokio::test]
async fn test_duplicate_ids_across_sources_rejected() {
    let result = ImportPipelineBuilder::new()
        .add_definition_content("a", DISCARD_YAML)
        .with_source(MemorySource::default().with_content("b", DISCARD_YAML))
        .build()
        .await;
    assert!(matches!(result, Err(SdkError::RuntimeError(_))));
}

#[tokio::test]
async fn test_reload_publishes_new_chain() {
    let (dir, discard, _cohorts) = setup().await;

    let pipeline = ImportPipelineBuilder::new()
        .add_definition_file(discard.clone())
        .build()
        .await
        .unwrap();

    let before = pipeline.chain();
    assert!(pipeline.process(from_pairs([("STATUS", "cancelled")])).is_discarded());

    write(
        dir.path(),
        "discard.yaml",
        "processor:\n  id: no_show\n  type: discard\n  priority: 1\n  conditions:\n    - STATUS = no show\n",
    )
    .await;

    assert_eq!(pipeline.reload().await.unwrap(), 1);
    assert!(pipeline.process(from_pairs([("STATUS", "cancelled")])).is_accepted());
    assert!(pipeline.process(from_pairs([("STATUS", "No Show")])).is_discarded());

    // snapshots taken before the reload keep the old chain
    assert_eq!(before.processors()[0].id(), "cancelled");
    assert!(before.run(from_pairs([("STATUS", "cancelled")])).is_discarded());
}

#[tokio::test]
async fn test_failed_reload_keeps_current_chain() {
    let (dir, discard, _cohorts) = setup().await;

    let pipeline = ImportPipelineBuilder::new()
        .add_definition_file(discard)
        .build()
        .await
        .unwrap();

    write(
        dir.path(),
        "discard.yaml",
        "processor:\n  id: broken\n  type: discard\n  priority: 1\n  conditions:\n    - LOCATION matches (\n",
    )
    .await;

    assert!(pipeline.reload().await.is_err());
    assert_eq!(pipeline.processor_count(), 1);
    assert_eq!(pipeline.chain().processors()[0].id(), "cancelled");
    assert!(pipeline.process(from_pairs([("STATUS", "cancelled")])).is_discarded());
}

#[tokio::test]
async fn test_processing_continues_during_reload() {
    let (_dir, discard, cohorts) = setup().await;

    let pipeline = Arc::new(
        ImportPipelineBuilder::new()
            .add_definition_file(discard)
            .add_definition_file(cohorts)
            .build()
            .await
            .unwrap(),
    );

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                let records = (0..200).map(|i| {
                    let status = if i % 2 == 0 { "cancelled" } else { "booked" };
                    from_pairs([("STATUS", status), ("AGE", "70"), ("DEPT", "MED")])
                });
                pipeline.process_batch(records, &CancellationFlag::new())
            })
        })
        .collect();

    for _ in 0..5 {
        pipeline.reload().await.unwrap();
    }

    for worker in workers {
        let result = worker.join().unwrap();
        assert_eq!(result.summary.processed, 200);
        assert_eq!(result.summary.discarded, 100);
        assert!(result
            .accepted
            .iter()
            .all(|r| r.get("CLINIC").map(String::as_str) == Some("/Survey/ClinicMapping/123456789")));
    }
}

#[tokio::test]
async fn test_batch_cancelled_before_start() {
    let pipeline = ImportPipelineBuilder::new()
        .add_definition_content("discard", DISCARD_YAML)
        .build()
        .await
        .unwrap();

    let cancel = CancellationFlag::new();
    cancel.cancel();

    let result = pipeline.process_batch(vec![from_pairs([("STATUS", "booked")])], &cancel);
    assert!(result.summary.cancelled);
    assert_eq!(result.summary.processed, 0);
    assert!(result.accepted.is_empty());
}
