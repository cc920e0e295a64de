//! File-backed store: one JSON document per key.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::{KeyValueStore, StoreError};

/// Stores each slot at `<dir>/<key>.json`, written atomically via a `.tmp`
/// file and rename so readers never observe a torn write. Writers are
/// serialized: concurrent `set` calls on the same slot share its tmp path,
/// and an unserialized pair could rename the other's half-finished swap
/// out from under it.
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.slot_path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(format!("read failed: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Backend(format!("create dir failed: {e}")))?;

        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::Backend(format!("write failed: {e}")))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Backend(format!("rename failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("walletData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("walletData", r#"{"balance":"850.00"}"#).await.unwrap();
        assert_eq!(
            store.get("walletData").await.unwrap().as_deref(),
            Some(r#"{"balance":"850.00"}"#)
        );
    }

    #[tokio::test]
    async fn set_fully_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("walletData", "a much longer first value").await.unwrap();
        store.set("walletData", "short").await.unwrap();
        assert_eq!(store.get("walletData").await.unwrap().as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("deeper"));
        store.set("walletData", "{}").await.unwrap();
        assert_eq!(store.get("walletData").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn concurrent_writers_on_one_slot_all_succeed() {
        use std::sync::Arc;

        let dir = tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.set("walletData", &format!("value-{i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Last writer wins; the slot holds exactly one intact value.
        let value = store.get("walletData").await.unwrap().unwrap();
        assert!(value.starts_with("value-"));
    }

    #[tokio::test]
    async fn no_tmp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("walletData", "{}").await.unwrap();
        assert!(!dir.path().join("walletData.json.tmp").exists());
        assert!(dir.path().join("walletData.json").exists());
    }
}
