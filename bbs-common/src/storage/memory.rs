//! In-process key-value store
//!
//! Used as the test double for durable storage. An optional byte quota
//! (keys plus values, like browser storage accounting) makes writes fail
//! with [`Error::QuotaExceeded`] once exceeded.

use super::KeyValueStore;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes pushing total usage past `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Bytes currently used by keys and values
    pub fn used_bytes(&self) -> usize {
        self.lock()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    /// Raw value for a key, bypassing the async interface
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock();
        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(Error::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").await.unwrap(), None);

        store.set("cart", "[]").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap().as_deref(), Some("[]"));

        store.remove("cart").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("favorites").await.is_ok());
    }

    #[tokio::test]
    async fn test_quota_rejects_and_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("cart", "[1]").await.unwrap();

        let err = store.set("cart", "[1,2,3,4,5,6,7,8]").await.unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded { quota: 16, .. }));
        assert_eq!(store.raw("cart").as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_quota_counts_replacement_not_sum() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "123456789").await.unwrap();
        // Replacing the value must not count the old one
        store.set("k", "987654321").await.unwrap();
        assert_eq!(store.used_bytes(), 10);
    }
}
