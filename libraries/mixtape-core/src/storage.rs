//! Record store contract
//!
//! Persistence is a plain key-value record store: each collection holds a
//! list of JSON records that is read as a whole at startup and written as a
//! whole after every mutation batch.

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named collection in the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Uploaded tracks, including the ones in the recycle bin
    Tracks,
    /// The working playlist, in order
    Playlist,
    /// Saved playlists, including the ones in the recycle bin
    Library,
}

impl Collection {
    /// All collections
    pub const ALL: [Collection; 3] = [Collection::Tracks, Collection::Playlist, Collection::Library];

    /// Storage key for the collection
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Tracks => "tracks",
            Collection::Playlist => "playlist",
            Collection::Library => "library",
        }
    }

    /// Record field that identifies a record within the collection
    ///
    /// Playlist records are keyed by entry id because the same track id can
    /// appear in several entries.
    pub fn key_field(&self) -> &'static str {
        match self {
            Collection::Tracks | Collection::Library => "id",
            Collection::Playlist => "entry_id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value record store
///
/// Implementations must return records from `get_all` in the order they were
/// last written by `put_all`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read every record of a collection
    async fn get_all(&self, collection: Collection) -> Result<Vec<serde_json::Value>>;

    /// Upsert records into a collection
    async fn put_all(&self, collection: Collection, records: Vec<serde_json::Value>)
        -> Result<()>;

    /// Remove every record of a collection
    async fn clear(&self, collection: Collection) -> Result<()>;

    /// Replace a collection with exactly the given records
    async fn replace_all(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> Result<()> {
        self.clear(collection).await?;
        self.put_all(collection, records).await
    }
}

/// Read and deserialize a whole collection
pub async fn load_records<T: DeserializeOwned>(
    store: &dyn RecordStore,
    collection: Collection,
) -> Result<Vec<T>> {
    store
        .get_all(collection)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(Into::into))
        .collect()
}

/// Serialize records for a collection
pub fn to_records<T: Serialize>(items: &[T]) -> Result<Vec<serde_json::Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}
