//! Durable key-value storage for wallet state.
//!
//! Every backend (file-based, in-memory for testing) implements the
//! [`KeyValueStore`] trait. The rest of the workspace depends only on the
//! trait; reads and writes are asynchronous and may fail, and callers own
//! the recovery policy.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// Asynchronous string-keyed blob storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a slot, fully overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
