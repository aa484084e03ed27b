//! File-backed store: `<dir>/<key>.json`.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) so a crash
//! mid-write leaves the previous value intact.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use super::{KeyValueStore, validate_key};

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).await?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "libris-file-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = FileStore::new(temp_dir("missing"));
        assert_eq!(store.get("favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_dir_and_round_trips() {
        let dir = temp_dir("set");
        let store = FileStore::new(dir.join("nested"));
        store.set("favorites", "[]").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap().as_deref(), Some("[]"));
        assert!(dir.join("nested").join("favorites.json").exists());
        assert!(!dir.join("nested").join("favorites.tmp").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let dir = temp_dir("overwrite");
        let store = FileStore::new(&dir);
        store.set("favorites", "first").await.unwrap();
        store.set("favorites", "second").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap().as_deref(), Some("second"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let dir = temp_dir("remove");
        let store = FileStore::new(&dir);
        assert!(store.remove("favorites").await.is_ok());
        store.set("favorites", "x").await.unwrap();
        store.remove("favorites").await.unwrap();
        assert_eq!(store.get("favorites").await.unwrap(), None);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let store = FileStore::new(temp_dir("keys"));
        let err = store.set("../escape", "x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
