//! Integration tests for hive-store
//!
//! These tests verify the full save/read/delete cycle against on-disk and
//! in-memory databases.

use hive_domain::traits::{CorpusReader, HexWriter};
use hive_domain::{ContentData, Edge, EdgeCondition, Hex, HexContents, HexKind};
use hive_store::{SqliteStore, StoreError};
use serde_json::json;
use tempfile::TempDir;

fn sample_hex(id: &str) -> Hex {
    Hex::new(
        id,
        format!("Hex {}", id),
        HexKind::Data,
        vec![format!("about {}", id)],
    )
}

fn rich_hex() -> Hex {
    let mut hex = Hex::new(
        "deploy-guide",
        "Deploy Guide",
        HexKind::Junction,
        vec!["deploy".to_string(), "release".to_string()],
    )
    .with_description("How releases are shipped")
    .with_tags(["guide-md"])
    .with_contents(HexContents::with_data(ContentData::new(json!({"steps": 3}))))
    .with_edge(Edge::new(
        "next-section",
        "rollback",
        EdgeCondition::intent("next section"),
        80,
        "Next section: Rollback",
    ));
    hex.stamp(1_700_000_000);
    hex
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_save_and_get_hex() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let hex = rich_hex();

    store.save_hex(hex.clone()).unwrap();

    let retrieved = store.get_hex("deploy-guide").unwrap();
    assert_eq!(retrieved, Some(hex));
    assert!(store.hex_exists("deploy-guide").unwrap());
    assert!(!store.hex_exists("missing").unwrap());
}

#[test]
fn test_saves_negative_related_priority() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let hex = sample_hex("ci").with_edge(Edge::new(
        "related-deploy",
        "deploy",
        EdgeCondition::always(),
        -10,
        "Related: Deploy",
    ));

    store.save_hex(hex.clone()).unwrap();
    let retrieved = store.get_hex("ci").unwrap().unwrap();
    assert_eq!(retrieved.edges[0].priority, -10);
    assert_eq!(retrieved, hex);
}

#[test]
fn test_save_replaces_existing() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.save_hex(sample_hex("a")).unwrap();
    store
        .save_hex(sample_hex("a").with_description("second"))
        .unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let hex = store.get_hex("a").unwrap().unwrap();
    assert_eq!(hex.description.as_deref(), Some("second"));
}

#[test]
fn test_bulk_save_and_ordering() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .bulk_save_hexes(vec![sample_hex("c"), sample_hex("a"), sample_hex("b")])
        .unwrap();

    let ids: Vec<String> = store
        .all_hexes()
        .unwrap()
        .into_iter()
        .map(|h| h.id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_bulk_save_rejects_invalid_batch() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let mut bad = sample_hex("bad");
    bad.entry_hints.clear();

    let result = store.bulk_save_hexes(vec![sample_hex("good"), bad]);
    assert!(matches!(result, Err(StoreError::Schema(_))));
    assert_eq!(store.count().unwrap(), 0, "Nothing should be written");
}

#[test]
fn test_delete_and_clear() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .bulk_save_hexes(vec![sample_hex("a"), sample_hex("b"), sample_hex("c")])
        .unwrap();

    assert!(store.delete_hex("a").unwrap());
    assert!(!store.delete_hex("a").unwrap());
    assert_eq!(store.count().unwrap(), 2);

    store.clear().unwrap();
    assert!(store.all_hexes().unwrap().is_empty());
}

#[test]
fn test_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hive.db");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store.save_hex(rich_hex()).unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    let hex = store.get_hex("deploy-guide").unwrap().unwrap();
    assert_eq!(hex.edges.len(), 1);
    assert_eq!(hex.tags, vec!["guide-md".to_string()]);
    assert_eq!(hex.created, 1_700_000_000);
}
