use std::fmt;

use async_trait::async_trait;

use crate::core::book::BookRecord;
use crate::core::search::SearchQuery;

/// Errors that can occur while querying a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Provider misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Everything a provider needs to run one search.
pub struct SearchRequest<'a> {
    pub query: &'a SearchQuery,
    /// Upper bound on returned records. Only the first page is ever fetched.
    pub max_results: u32,
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs a search and returns records in the order the catalog ranked them.
    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookRecord>, CatalogError>;
}
