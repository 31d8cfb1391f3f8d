//! Mixtape Storage
//!
//! Record store backends for Mixtape.
//!
//! The engine persists three collections (tracks, the working playlist and
//! the saved playlist library) as ordered lists of JSON records. This crate
//! provides two implementations of `mixtape_core::RecordStore`:
//!
//! - **`SqliteStore`**: durable store backed by a single `SQLite` table
//! - **`MemoryStore`**: process-local store for tests and previews
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_core::{Collection, RecordStore};
//! use mixtape_storage::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::connect("sqlite://mixtape.db").await?;
//!
//! let tracks = store.get_all(Collection::Tracks).await?;
//! println!("{} tracks stored", tracks.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod sqlite;

pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use sqlite::{create_pool, run_migrations, SqliteStore};

use mixtape_core::Collection;

/// Extract the key of a record for the given collection
pub(crate) fn record_key(collection: Collection, record: &serde_json::Value) -> Result<String> {
    record
        .get(collection.key_field())
        .and_then(|value| value.as_str())
        .map(str::to_owned)
        .ok_or(StorageError::MissingKey {
            collection,
            field: collection.key_field(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn playlist_records_are_keyed_by_entry_id() {
        let record = json!({ "entry_id": "e1", "id": "t1" });
        assert_eq!(record_key(Collection::Playlist, &record).unwrap(), "e1");
        assert_eq!(record_key(Collection::Tracks, &record).unwrap(), "t1");
    }

    #[test]
    fn missing_key_is_an_error() {
        let record = json!({ "name": "no id" });
        assert!(matches!(
            record_key(Collection::Library, &record),
            Err(StorageError::MissingKey { field: "id", .. })
        ));
    }
}
