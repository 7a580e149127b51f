//! End-to-end tests for the CLI commands against an in-memory corpus.

use hive_cli::cli::{IngestArgs, QueryArgs, ShowArgs, TraverseArgs};
use hive_cli::commands;
use hive_cli::config::OutputFormat;
use hive_cli::{CliError, Formatter};
use hive_domain::traits::CorpusReader;
use hive_ingest::{IngestConfig, LlmExtractor, Pipeline};
use hive_llm::MockProvider;
use hive_store::MemoryStore;
use std::fs;
use tempfile::TempDir;

const RESPONSE: &str = r#"{
  "hexes": [
    {
      "id": "Deploy Guide",
      "name": "Deploy Guide",
      "type": "data",
      "description": "How to ship a release",
      "entryHints": ["deploy the app", "release process"],
      "tags": ["ops"],
      "contents": {"data": "Run the pipeline."},
      "edges": [
        {
          "id": "to-rollback",
          "to": "rollback",
          "when": {"intent": "undo"},
          "priority": 70,
          "description": "If the release goes wrong"
        }
      ]
    },
    {
      "id": "rollback",
      "name": "Rollback",
      "type": "tool",
      "description": "Revert a bad release",
      "entryHints": ["rollback release"],
      "tags": [],
      "contents": {},
      "edges": []
    }
  ],
  "summary": "Deployment notes"
}"#;

fn pipeline(response: &str) -> Pipeline<LlmExtractor<MockProvider>> {
    Pipeline::new(
        LlmExtractor::new(MockProvider::new(response)),
        IngestConfig::default(),
    )
    .unwrap()
}

fn ingest_text(text: &str) -> IngestArgs {
    IngestArgs {
        files: Vec::new(),
        text: Some(text.to_string()),
        name: None,
        source_type: None,
        model: None,
        dry_run: false,
    }
}

fn json() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

#[tokio::test]
async fn test_ingest_then_browse() {
    let mut store = MemoryStore::new();
    let output = commands::execute_ingest(
        &ingest_text("Deploying means running the release pipeline."),
        &pipeline(RESPONSE),
        &mut store,
        &json(),
    )
    .await
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["summary"], "Deployment notes");
    assert_eq!(parsed["saved"], true);
    assert_eq!(store.len(), 2);

    // Identifier was sanitized on the way in
    let hex = store.get_hex("deploy-guide").unwrap().unwrap();
    assert!(hex.created > 0);

    let listed = commands::execute_list(&store, &json()).unwrap();
    let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let query = QueryArgs {
        intent: "how do I deploy".to_string(),
        limit: 5,
    };
    let results = commands::execute_query(&query, &store, &json()).unwrap();
    let results: serde_json::Value = serde_json::from_str(&results).unwrap();
    assert_eq!(results[0]["id"], "deploy-guide");

    let traverse = TraverseArgs {
        id: "deploy-guide".to_string(),
        intent: "undo the release".to_string(),
        payload: Some(r#"{"version": 3}"#.to_string()),
    };
    let hops = commands::execute_traverse(&traverse, &store, &json()).unwrap();
    let hops: serde_json::Value = serde_json::from_str(&hops).unwrap();
    assert_eq!(hops[0]["to"], "rollback");
    assert_eq!(hops[0]["payload"]["version"], 3);
}

#[tokio::test]
async fn test_dry_run_saves_nothing() {
    let mut store = MemoryStore::new();
    let mut args = ingest_text("Deploying means running the release pipeline.");
    args.dry_run = true;

    let output = commands::execute_ingest(&args, &pipeline(RESPONSE), &mut store, &json())
        .await
        .unwrap();

    assert!(output.contains("\"saved\": false"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_second_ingest_gets_fresh_ids() {
    let mut store = MemoryStore::new();
    let text = ingest_text("Deploying means running the release pipeline.");

    commands::execute_ingest(&text, &pipeline(RESPONSE), &mut store, &json())
        .await
        .unwrap();
    commands::execute_ingest(&text, &pipeline(RESPONSE), &mut store, &json())
        .await
        .unwrap();

    assert_eq!(store.len(), 4);
    assert!(store.hex_exists("deploy-guide-1").unwrap());
    assert!(store.hex_exists("rollback-1").unwrap());
}

#[tokio::test]
async fn test_short_text_is_rejected() {
    let mut store = MemoryStore::new();
    let result = commands::execute_ingest(
        &ingest_text("tiny"),
        &pipeline(RESPONSE),
        &mut store,
        &json(),
    )
    .await;

    assert!(matches!(result, Err(CliError::InvalidInput(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_ingest_markdown_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("guide.md");
    fs::write(&path, "# Deploy\n\nDeploying means running the release pipeline.").unwrap();

    let args = IngestArgs {
        files: vec![path],
        text: None,
        name: None,
        source_type: None,
        model: None,
        dry_run: false,
    };
    let mut store = MemoryStore::new();
    let quiet = Formatter::new(OutputFormat::Quiet, false);
    let output = commands::execute_ingest(&args, &pipeline(RESPONSE), &mut store, &quiet)
        .await
        .unwrap();

    assert_eq!(output, "deploy-guide\nrollback");
}

#[tokio::test]
async fn test_unsupported_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paper.pdf");
    fs::write(&path, "%PDF-1.7").unwrap();

    let args = IngestArgs {
        files: vec![path],
        text: None,
        name: None,
        source_type: None,
        model: None,
        dry_run: false,
    };
    let mut store = MemoryStore::new();
    let result =
        commands::execute_ingest(&args, &pipeline(RESPONSE), &mut store, &json()).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[tokio::test]
async fn test_one_short_file_rejects_the_batch() {
    let dir = TempDir::new().unwrap();
    let long = dir.path().join("guide.md");
    let short = dir.path().join("stub.txt");
    fs::write(&long, "# Deploy\n\nDeploying means running the release pipeline.").unwrap();
    fs::write(&short, "todo").unwrap();

    let args = IngestArgs {
        files: vec![long, short],
        text: None,
        name: None,
        source_type: None,
        model: None,
        dry_run: false,
    };
    let mut store = MemoryStore::new();
    let result =
        commands::execute_ingest(&args, &pipeline(RESPONSE), &mut store, &json()).await;

    assert!(matches!(&result, Err(CliError::InvalidInput(msg)) if msg.contains("stub.txt")));
    assert!(store.is_empty());
}

#[test]
fn test_show_missing_hex() {
    let store = MemoryStore::new();
    let args = ShowArgs {
        id: "nowhere".to_string(),
    };
    let result = commands::execute_show(&args, &store, &json());
    assert!(matches!(result, Err(CliError::NotFound(id)) if id == "nowhere"));
}
