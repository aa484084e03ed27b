//! # Search
//!
//! Turns raw user input into a catalog request. Blank input never becomes a
//! `SearchQuery`, so it never reaches the network.

use std::fmt;

use log::debug;

use crate::catalog::{CatalogError, CatalogProvider, SearchRequest};
use crate::core::book::BookRecord;

/// A trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs a search for an already-validated query.
pub async fn run(
    catalog: &dyn CatalogProvider,
    query: &SearchQuery,
    page_size: u32,
) -> Result<Vec<BookRecord>, CatalogError> {
    debug!("Searching {} for {:?} (page size {})", catalog.name(), query.as_str(), page_size);
    let mut records = catalog
        .search(SearchRequest {
            query,
            max_results: page_size,
        })
        .await?;
    // Providers are trusted to honor max_results, but the cap is part of the contract.
    records.truncate(page_size as usize);
    Ok(records)
}
