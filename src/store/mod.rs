//! Key-value persistence for the calculator's raw inputs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Keys under which the calculator's inputs are persisted.
pub mod keys {
    pub const PURCHASES: &str = "purchases";
    pub const CUSTOM_PROFIT: &str = "customProfit";
    pub const DESIRED_PRICE: &str = "desiredPrice";
}

/// String-keyed store holding JSON-encoded values.
///
/// Last write wins; there are no transactions across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Raw stored text for `key`, if any.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the stored text for `key`.
    async fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Missing keys are ignored.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Delete every key.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read `key` and decode it, falling back to `default`.
///
/// Missing keys and empty stored text yield the default. Text that does not
/// decode into `T` also yields the default and is logged.
pub async fn get_or<T>(store: &dyn KeyValueStore, key: &str, default: T) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get_raw(key).await? else {
        return Ok(default);
    };
    if raw.is_empty() {
        return Ok(default);
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Ignoring undecodable value stored under {}: {}", key, e);
            Ok(default)
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub async fn set<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, raw).await
}
