//! SQLite-backed store; entries survive restarts.

use super::{KeyValueStore, StoreError};
use crate::db::init_db;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    /// Open the database at `db_path`, creating and migrating it if needed.
    pub async fn open(db_path: &str) -> Result<Self, StoreError> {
        Ok(Self::new(init_db(db_path).await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_entries")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> SqliteStore {
        let path = dir.path().join("kv.db").to_string_lossy().to_string();
        SqliteStore::open(&path).await.expect("open failed")
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;
        assert_eq!(store.get_raw("purchases").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_is_last_write_wins() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;

        store.set_raw("desiredPrice", "\"10\"".to_string()).await.unwrap();
        store.set_raw("desiredPrice", "\"12\"".to_string()).await.unwrap();

        assert_eq!(
            store.get_raw("desiredPrice").await.unwrap().as_deref(),
            Some("\"12\"")
        );
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir).await;
        store.set_raw("a", "1".to_string()).await.unwrap();
        store.set_raw("b", "2".to_string()).await.unwrap();

        store.remove("a").await.unwrap();
        assert_eq!(store.get_raw("a").await.unwrap(), None);
        assert_eq!(store.get_raw("b").await.unwrap().as_deref(), Some("2"));

        store.clear().await.unwrap();
        assert_eq!(store.get_raw("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = open_store(&temp_dir).await;
            store.set_raw("customProfit", "\"\"".to_string()).await.unwrap();
            store.pool().close().await;
        }
        let store = open_store(&temp_dir).await;
        assert_eq!(
            store.get_raw("customProfit").await.unwrap().as_deref(),
            Some("\"\"")
        );
    }
}
