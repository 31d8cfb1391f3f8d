//! `SQLite`-backed record store

use crate::{record_key, Result};
use async_trait::async_trait;
use mixtape_core::{Collection, RecordStore};
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use sqlx::{Row, Sqlite, Transaction};
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://mixtape.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Record store backed by a single `records` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool (migrations must already have run)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and apply migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch(&self, collection: Collection) -> Result<Vec<serde_json::Value>> {
        let rows = sqlx::query(
            r#"
            SELECT body
            FROM records
            WHERE collection = ?
            ORDER BY position ASC
            "#,
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let body: String = row.get("body");
                serde_json::from_str(&body).map_err(Into::into)
            })
            .collect()
    }

    async fn upsert(&self, collection: Collection, records: Vec<serde_json::Value>) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        write_records(&mut tx, collection, &records).await?;
        tx.commit().await?;

        debug!("Stored {} records in {}", records.len(), collection);
        Ok(())
    }

    async fn replace(&self, collection: Collection, records: Vec<serde_json::Value>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM records WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&mut *tx)
            .await?;
        // Dropping `tx` on error rolls the delete back
        write_records(&mut tx, collection, &records).await?;

        tx.commit().await?;
        debug!("Replaced {} with {} records", collection, records.len());
        Ok(())
    }

    async fn delete_all(&self, collection: Collection) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE collection = ?")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn get_all(&self, collection: Collection) -> mixtape_core::Result<Vec<serde_json::Value>> {
        Ok(self.fetch(collection).await?)
    }

    async fn put_all(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> mixtape_core::Result<()> {
        Ok(self.upsert(collection, records).await?)
    }

    async fn clear(&self, collection: Collection) -> mixtape_core::Result<()> {
        Ok(self.delete_all(collection).await?)
    }

    async fn replace_all(
        &self,
        collection: Collection,
        records: Vec<serde_json::Value>,
    ) -> mixtape_core::Result<()> {
        Ok(self.replace(collection, records).await?)
    }
}

/// Upsert records after the current tail of the collection
async fn write_records(
    tx: &mut Transaction<'_, Sqlite>,
    collection: Collection,
    records: &[serde_json::Value],
) -> Result<()> {
    let next: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position), -1) + 1 AS next FROM records WHERE collection = ?",
    )
    .bind(collection.as_str())
    .fetch_one(&mut **tx)
    .await?
    .get("next");

    for (offset, record) in records.iter().enumerate() {
        let key = record_key(collection, record)?;
        let body = serde_json::to_string(record)?;

        sqlx::query(
            r#"
            INSERT INTO records (collection, record_key, position, body)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (collection, record_key) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(collection.as_str())
        .bind(key)
        .bind(next + offset as i64)
        .bind(body)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
