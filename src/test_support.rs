//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CatalogError, CatalogProvider, SearchRequest};
use crate::core::book::BookRecord;
use crate::core::favorites::FavoritesStore;
use crate::core::state::App;
use crate::storage::{KeyValueStore, MemoryStore};

/// A record with an id and a title.
pub fn book(id: &str, title: &str) -> BookRecord {
    BookRecord {
        title: Some(title.to_string()),
        ..BookRecord::new(id)
    }
}

/// A catalog that returns canned results and counts calls.
pub struct MockCatalog {
    records: Vec<BookRecord>,
    fail: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockCatalog {
    pub fn returning(records: Vec<BookRecord>) -> Self {
        Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookRecord>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(request.query.as_str().to_string());
        if self.fail {
            return Err(CatalogError::Network("mock failure".to_string()));
        }
        Ok(self.records.clone())
    }
}

/// A key-value store whose reads or writes always fail.
pub struct FailingStore {
    fail_reads: bool,
    inner: MemoryStore,
}

impl FailingStore {
    /// Reads succeed (empty), writes fail.
    pub fn writes() -> Self {
        Self {
            fail_reads: false,
            inner: MemoryStore::new(),
        }
    }

    /// Every operation fails.
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read denied"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
    }

    async fn remove(&self, _key: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
    }
}

/// An in-memory store whose writes take a while to land.
pub struct SlowStore {
    delay: Duration,
    inner: MemoryStore,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowStore {
    fn name(&self) -> &str {
        "slow"
    }

    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.remove(key).await
    }
}

/// Creates a test App with an empty mock catalog and an in-memory store.
pub fn test_app() -> App {
    test_app_with(
        Arc::new(MockCatalog::returning(Vec::new())),
        Arc::new(MemoryStore::new()),
    )
}

pub fn test_app_with(catalog: Arc<dyn CatalogProvider>, store: Arc<dyn KeyValueStore>) -> App {
    App::new(catalog, Arc::new(FavoritesStore::new(store)), 20)
}
