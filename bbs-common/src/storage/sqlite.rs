//! SQLite-backed key-value store
//!
//! Each collection is one row of the `storage` table. Writes are upserts,
//! so the last writer wins.

use super::KeyValueStore;
use crate::db::StorageEntry;
use crate::Result;
use sqlx::SqlitePool;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap a pool whose schema has been created by `db::init_database`
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All stored entries, ordered by key
    pub async fn entries(&self) -> Result<Vec<StorageEntry>> {
        let rows = sqlx::query_as::<_, StorageEntry>(
            "SELECT key, value, updated_at FROM storage ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO storage (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    async fn store() -> SqliteStore {
        SqliteStore::new(init_memory_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = store().await;
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_is_upsert() {
        let store = store().await;
        store.set("cart", "[]").await.unwrap();
        store.set("cart", r#"[{"beatId":"1"}]"#).await.unwrap();

        assert_eq!(
            store.get("cart").await.unwrap().as_deref(),
            Some(r#"[{"beatId":"1"}]"#)
        );
        assert_eq!(store.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store().await;
        store.set("favorites", r#"["1"]"#).await.unwrap();
        store.remove("favorites").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_ordered_by_key() {
        let store = store().await;
        store.set("favorites", "[]").await.unwrap();
        store.set("cart", "[]").await.unwrap();

        let keys: Vec<String> = store.entries().await.unwrap().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["cart", "favorites"]);
    }
}
