//! Google Books provider.
//!
//! One request per search:
//!
//! ```text
//! GET {base_url}/volumes?q=<query>&maxResults=<n>[&key=<api key>]
//! ```
//!
//! The API key is optional; anonymous requests work with a lower quota.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::catalog::types::VolumesResponse;
use crate::catalog::{CatalogError, CatalogProvider, SearchRequest};
use crate::core::book::BookRecord;
use crate::core::config::DEFAULT_CATALOG_BASE_URL;

/// Google caps `maxResults` at 40.
pub const MAX_RESULTS_LIMIT: u32 = 40;

pub struct GoogleBooksProvider {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleBooksProvider {
    /// Creates a new Google Books provider.
    ///
    /// # Arguments
    /// * `api_key` - Optional API key
    /// * `base_url` - Optional custom base URL (defaults to the public v1 API)
    /// * `timeout` - Whole-request timeout
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url,
            client,
        })
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooksProvider {
    fn name(&self) -> &str {
        "google-books"
    }

    async fn search(&self, request: SearchRequest<'_>) -> Result<Vec<BookRecord>, CatalogError> {
        let max_results = request.max_results.clamp(1, MAX_RESULTS_LIMIT);
        let mut params: Vec<(&str, String)> = vec![
            ("q", request.query.as_str().to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        info!(
            "Google Books search: q={:?}, maxResults={}, keyed={}",
            request.query.as_str(),
            max_results,
            self.api_key.is_some()
        );

        let response = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        debug!("Google Books response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Google Books API error: {} - {}", status, err_body);
            return Err(CatalogError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let volumes: VolumesResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        debug!(
            "Google Books returned {} items (totalItems={})",
            volumes.items.len(),
            volumes.total_items
        );
        Ok(volumes.into_records(max_results as usize))
    }
}
