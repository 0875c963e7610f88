//! Persistence layer for cart and favorites collections
//!
//! Two named collections live in a durable key-value store, each serialized
//! as JSON text. Reads fail soft: a missing or corrupt value loads as an
//! empty collection, and individual entries that do not parse are skipped.
//! Writes return their error so the engines can log it and carry on with
//! in-memory state.
//!
//! The backend is a [`KeyValueStore`]. Tests use [`MemoryStore`]; the
//! storefront service uses [`SqliteStore`].

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

mod memory;
#[cfg(feature = "sqlx")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlx")]
pub use sqlite::SqliteStore;

/// Durable string key-value store
///
/// Values are opaque text; the last `set` for a key wins. Implementations
/// must be safe to share between tasks.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Named collections kept in durable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// Cart line items
    Cart,
    /// Favorite beat ids
    Favorites,
}

impl CollectionKey {
    /// Storage key string
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Cart => "cart",
            CollectionKey::Favorites => "favorites",
        }
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed collection access over a key-value backend
///
/// Cloning is cheap; clones share the backend.
#[derive(Debug)]
pub struct Persistence<S> {
    store: Arc<S>,
}

impl<S> Clone for Persistence<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The shared backend
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load a collection, degrading to empty on any failure
    pub async fn load_collection<T: DeserializeOwned>(&self, key: CollectionKey) -> Vec<T> {
        let text = match self.store.get(key.as_str()).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read '{}' from storage, using empty collection: {}", key, e);
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&text) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored '{}' is not valid, using empty collection: {}", key, e);
                return Vec::new();
            }
        };

        // One unreadable entry must not cost the rest of the collection
        let total = entries.len();
        let items: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if items.len() < total {
            warn!(
                "Dropped {} unreadable entries from stored '{}'",
                total - items.len(),
                key
            );
        }
        items
    }

    /// Serialize and write a collection, replacing any prior value
    pub async fn save_collection<T: Serialize>(&self, key: CollectionKey, items: &[T]) -> Result<()> {
        let text = serde_json::to_string(items).map_err(Error::Serialization)?;
        self.store.set(key.as_str(), &text).await
    }

    /// Remove a collection entirely
    pub async fn clear(&self, key: CollectionKey) -> Result<()> {
        self.store.remove(key.as_str()).await
    }
}
