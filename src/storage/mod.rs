//! # Key-Value Persistence
//!
//! The favorites store only ever needs three things from storage: read a
//! string by key, overwrite it, and delete it. `KeyValueStore` is that seam.
//!
//! - [`FileStore`]: one JSON file per key under a data directory
//! - [`MemoryStore`]: process-local map, for tests and as a fallback

use std::io;

use async_trait::async_trait;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Returns `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrites the whole value stored at `key`.
    async fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> io::Result<()>;
}

/// Keys become file names, so they are restricted to `[A-Za-z0-9_-]+`.
pub(crate) fn validate_key(key: &str) -> io::Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid storage key: {key:?}"),
        ))
    }
}
