//! In-memory record store

use crate::record_key;
use async_trait::async_trait;
use mixtape_core::{Collection, RecordStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Record store that keeps everything in process memory
///
/// Useful for tests and for previewing a playlist without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<serde_json::Value>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in a collection
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_all(&self, collection: Collection) -> mixtape_core::Result<Vec<serde_json::Value>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn put_all(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> mixtape_core::Result<()> {
        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection).or_default();

        for record in records {
            let key = record_key(collection, &record)?;
            let existing = stored
                .iter()
                .position(|r| record_key(collection, r).ok().as_deref() == Some(key.as_str()));

            match existing {
                Some(index) => stored[index] = record,
                None => stored.push(record),
            }
        }

        Ok(())
    }

    async fn clear(&self, collection: Collection) -> mixtape_core::Result<()> {
        self.collections.write().await.remove(&collection);
        Ok(())
    }

    async fn replace_all(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> mixtape_core::Result<()> {
        // Later duplicates win, at the position of the first occurrence
        let mut replaced: Vec<serde_json::Value> = Vec::with_capacity(records.len());
        let mut placed: HashMap<String, usize> = HashMap::new();
        for record in records {
            let key = record_key(collection, &record)?;
            match placed.get(&key) {
                Some(&slot) => replaced[slot] = record,
                None => {
                    placed.insert(key, replaced.len());
                    replaced.push(record);
                }
            }
        }

        self.collections.write().await.insert(collection, replaced);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_all_upserts_by_key() {
        let store = MemoryStore::new();
        store
            .put_all(
                Collection::Tracks,
                vec![json!({"id": "a", "name": "A"}), json!({"id": "b", "name": "B"})],
            )
            .await
            .unwrap();
        store
            .put_all(Collection::Tracks, vec![json!({"id": "a", "name": "A2"})])
            .await
            .unwrap();

        let records = store.get_all(Collection::Tracks).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "A2");
        assert_eq!(records[1]["name"], "B");
    }

    #[tokio::test]
    async fn replace_all_drops_stale_records() {
        let store = MemoryStore::new();
        store
            .put_all(
                Collection::Playlist,
                vec![json!({"entry_id": "1"}), json!({"entry_id": "2"})],
            )
            .await
            .unwrap();
        store
            .replace_all(Collection::Playlist, vec![json!({"entry_id": "2"})])
            .await
            .unwrap();

        assert_eq!(store.len(Collection::Playlist).await, 1);
    }

    #[tokio::test]
    async fn failed_replace_keeps_previous_records() {
        let store = MemoryStore::new();
        store
            .put_all(Collection::Tracks, vec![json!({"id": "t1"}), json!({"id": "t2"})])
            .await
            .unwrap();

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

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryStore::new();
        store
            .put_all(Collection::Library, vec![json!({"id": "p1"})])
            .await
            .unwrap();
        store.clear(Collection::Tracks).await.unwrap();

        assert_eq!(store.len(Collection::Library).await, 1);
        assert!(store.get_all(Collection::Tracks).await.unwrap().is_empty());
    }
}
