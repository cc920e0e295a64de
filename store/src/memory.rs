//! In-memory store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::{KeyValueStore, StoreError};

/// A `HashMap` behind a mutex. Writes can be forced to fail to exercise
/// the bridge's write-failure policy.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, every `set` returns a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Direct read for test assertions.
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write failure injected".to_string()));
        }
        self.entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("walletData").await.unwrap().is_none());

        store.set("walletData", "{}").await.unwrap();
        assert_eq!(store.get("walletData").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set("walletData", "old").await.unwrap();
        store.set("walletData", "new").await.unwrap();
        assert_eq!(store.get("walletData").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn injected_write_failure_surfaces() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set("walletData", "{}").await.is_err());

        store.set_fail_writes(false);
        assert!(store.set("walletData", "{}").await.is_ok());
    }
}
