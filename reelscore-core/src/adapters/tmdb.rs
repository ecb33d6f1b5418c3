//! TMDb catalog client
//!
//! Thin reqwest wrapper around the TMDb v3 API, covering the two endpoints
//! the search service needs: text search and per-movie detail lookup. Every
//! request carries the API key and a language tag.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::movie::CatalogMovie;
use crate::domain::result::{Error, Result};
use crate::ports::MovieCatalog;

/// Default TMDb API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDb API client
#[derive(Debug)]
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Response envelope of the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CatalogMovie>,
}

impl TmdbCatalog {
    /// Create a client for the given API root and key. The root is
    /// overridable so tests can point the client at a local server.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid catalog base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "catalog base URL must be http(s), got '{base_url}'"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::catalog(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn search(&self, query: &str, language: &str) -> Result<Vec<CatalogMovie>> {
        let url = format!("{}/search/movie", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", language),
            ])
            .send()
            .await
            .map_err(|e| Error::catalog(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::catalog(format!(
                "search returned status {status}"
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::catalog(format!("malformed search response: {e}")))?;
        Ok(body.results)
    }

    async fn detail(&self, movie_id: i64, language: &str) -> Result<Option<CatalogMovie>> {
        let url = format!("{}/movie/{movie_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", language),
            ])
            .send()
            .await
            .map_err(|e| Error::catalog(format!("detail request failed: {e}")))?;

        let status = response.status();
        // The catalog answers 4xx/5xx for IDs it does not know; report
        // absence instead of failing the lookup.
        if status.is_client_error() || status.is_server_error() {
            return Ok(None);
        }

        let movie: CatalogMovie = response
            .json()
            .await
            .map_err(|e| Error::catalog(format!("malformed detail response: {e}")))?;
        Ok(Some(movie))
    }
}
