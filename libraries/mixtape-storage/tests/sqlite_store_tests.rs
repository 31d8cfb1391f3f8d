//! Integration tests for the SQLite record store
//!
//! Uses REAL SQLite files in a temp directory (not in-memory) so migrations
//! and constraints behave as in production.

use mixtape_core::{Collection, RecordStore};
use mixtape_storage::SqliteStore;
use serde_json::json;
use tempfile::TempDir;

async fn open_store() -> (SqliteStore, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let store = SqliteStore::connect(&db_url)
        .await
        .expect("Failed to open store");

    (store, temp_dir)
}

#[tokio::test]
async fn empty_collection_returns_no_records() {
    let (store, _dir) = open_store().await;

    let records = store.get_all(Collection::Tracks).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn records_come_back_in_write_order() {
    let (store, _dir) = open_store().await;

    let entries = vec![
        json!({"entry_id": "e3", "id": "t1"}),
        json!({"entry_id": "e1", "id": "t1"}),
        json!({"entry_id": "e2", "id": "t2"}),
    ];
    store
        .put_all(Collection::Playlist, entries.clone())
        .await
        .unwrap();

    let records = store.get_all(Collection::Playlist).await.unwrap();
    assert_eq!(records, entries);
}

#[tokio::test]
async fn put_all_updates_existing_records_in_place() {
    let (store, _dir) = open_store().await;

    store
        .put_all(
            Collection::Tracks,
            vec![json!({"id": "a", "name": "A"}), json!({"id": "b", "name": "B"})],
        )
        .await
        .unwrap();
    store
        .put_all(
            Collection::Tracks,
            vec![json!({"id": "a", "name": "A (edited)"}), json!({"id": "c", "name": "C"})],
        )
        .await
        .unwrap();

    let records = store.get_all(Collection::Tracks).await.unwrap();
    let names: Vec<&str> = records.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["A (edited)", "B", "C"]);
}

#[tokio::test]
async fn replace_all_reflects_reorder_and_removal() {
    let (store, _dir) = open_store().await;

    store
        .put_all(
            Collection::Playlist,
            vec![
                json!({"entry_id": "1"}),
                json!({"entry_id": "2"}),
                json!({"entry_id": "3"}),
            ],
        )
        .await
        .unwrap();
    store
        .replace_all(
            Collection::Playlist,
            vec![json!({"entry_id": "3"}), json!({"entry_id": "1"})],
        )
        .await
        .unwrap();

    let records = store.get_all(Collection::Playlist).await.unwrap();
    assert_eq!(records, vec![json!({"entry_id": "3"}), json!({"entry_id": "1"})]);
}

#[tokio::test]
async fn records_without_key_are_rejected() {
    let (store, _dir) = open_store().await;

    let result = store
        .put_all(Collection::Library, vec![json!({"name": "nameless"})])
        .await;
    assert!(result.is_err());

    // Nothing was written
    assert!(store.get_all(Collection::Library).await.unwrap().is_empty());
}

#[tokio::test]
async fn data_survives_reopening() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("persist.db").display());

    {
        let store = SqliteStore::connect(&db_url).await.unwrap();
        store
            .put_all(Collection::Library, vec![json!({"id": "p1", "name": "Road Trip"})])
            .await
            .unwrap();
        store.pool().close().await;
    }

    let store = SqliteStore::connect(&db_url).await.unwrap();
    let records = store.get_all(Collection::Library).await.unwrap();
    assert_eq!(records[0]["name"], "Road Trip");
}

// ===== Snapshot replacement =====

#[tokio::test]
async fn failed_replace_keeps_previous_snapshot() {
    let (store, _dir) = open_store().await;

    store
        .put_all(Collection::Tracks, vec![json!({"id": "t1"}), json!({"id": "t2"})])
        .await
        .unwrap();

    // Second record has no key, so the whole replacement must roll back
    let result = store
        .replace_all(
            Collection::Tracks,
            vec![json!({"id": "t3"}), json!({"name": "no key"})],
        )
        .await;
    assert!(result.is_err());

    let records = store.get_all(Collection::Tracks).await.unwrap();
    assert_eq!(records, vec![json!({"id": "t1"}), json!({"id": "t2"})]);
}
