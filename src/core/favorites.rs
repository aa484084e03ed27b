//! # Favorites Store
//!
//! Owns the user's saved books: one JSON array stored under a single key.
//!
//! ```text
//! "favorites" → [ BookRecord, BookRecord, ... ]   (insertion order = display order)
//! ```
//!
//! Every mutation is a full read-modify-write of that array and holds `lock`
//! for the whole cycle, so two tasks adding at once cannot overwrite each
//! other's append. `list` takes the same lock, so a read never observes the
//! value from before a write that already started.
//!
//! Callers only ever get snapshots (`Vec<BookRecord>`). A snapshot is not
//! updated by later mutations.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::core::book::BookRecord;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Errors from favorites operations.
#[derive(Debug)]
pub enum StoreError {
    /// The backing store could not be read.
    Read(String),
    /// The stored value is not a valid favorites list. Left untouched on disk.
    Corrupt(String),
    /// The updated list could not be written. The previous value is still in place.
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read(msg) => write!(f, "could not read favorites: {msg}"),
            StoreError::Corrupt(msg) => write!(f, "saved favorites are unreadable: {msg}"),
            StoreError::Write(msg) => write!(f, "could not save favorites: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Result of [`FavoritesStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// A record with the same id was already saved; the stored entry is returned unchanged.
    AlreadyPresent(BookRecord),
}

pub struct FavoritesStore {
    backend: Arc<dyn KeyValueStore>,
    allow_duplicates: bool,
    lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            allow_duplicates: false,
            lock: Mutex::new(()),
        }
    }

    /// When enabled, `add` appends even if the id is already saved.
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Returns the saved books. A missing key is an empty list.
    pub async fn list(&self) -> Result<Vec<BookRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Appends `record` unless its id is already saved (see `allow_duplicates`).
    pub async fn add(&self, record: BookRecord) -> Result<AddOutcome, StoreError> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.read().await?;

        if !self.allow_duplicates
            && let Some(existing) = favorites.iter().find(|b| b.id == record.id)
        {
            debug!("Favorite {} already saved, not adding again", record.id);
            return Ok(AddOutcome::AlreadyPresent(existing.clone()));
        }

        info!("Adding favorite {} ({})", record.id, record.display_title());
        favorites.push(record);
        self.write(&favorites).await?;
        Ok(AddOutcome::Added)
    }

    /// Removes every record with this id. Removing an unknown id does nothing.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.read().await?;
        let before = favorites.len();
        favorites.retain(|b| b.id != id);
        if favorites.len() == before {
            debug!("Remove of unknown favorite {} is a no-op", id);
            return Ok(());
        }

        info!("Removing favorite {} ({} entries)", id, before - favorites.len());
        self.write(&favorites).await
    }

    /// Drops the stored value without reading it, so it also recovers from a
    /// corrupt value.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        info!("Clearing favorites on {} backend", self.backend.name());
        self.backend.remove(FAVORITES_KEY).await.map_err(|e| {
            warn!("Failed to clear favorites: {}", e);
            StoreError::Write(e.to_string())
        })
    }

    /// Reads and decodes the stored list. Callers hold `lock`.
    async fn read(&self) -> Result<Vec<BookRecord>, StoreError> {
        let raw = self
            .backend
            .get(FAVORITES_KEY)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        match raw {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                warn!("Favorites value on {} backend is corrupt: {}", self.backend.name(), e);
                StoreError::Corrupt(e.to_string())
            }),
        }
    }

    async fn write(&self, favorites: &[BookRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(favorites)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        self.backend
            .set(FAVORITES_KEY, &json)
            .await
            .map_err(|e| {
                warn!("Failed to write favorites: {}", e);
                StoreError::Write(e.to_string())
            })
    }
}
