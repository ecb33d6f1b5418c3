//! Configuration management
//!
//! All settings come from the environment. Everything has a usable default
//! except the catalog API key: its absence disables movie search (searches
//! return empty results) instead of failing startup.

use std::env;

use crate::adapters::tmdb::DEFAULT_BASE_URL;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog API key. `None` (unset or blank) degrades movie search to
    /// empty results.
    pub tmdb_api_key: Option<String>,
    /// Catalog API root, overridable for tests.
    pub tmdb_base_url: String,
    /// Language tag for the initial search call.
    pub search_language: String,
    /// Reference language for the enrichment lookups.
    pub detail_language: String,
    /// Address the HTTP surface binds to.
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_BASE_URL.to_string(),
            search_language: "es-ES".to_string(),
            detail_language: "en-US".to_string(),
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment. Never fails: missing or
    /// blank variables fall back to the defaults (or `None` for the key).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tmdb_api_key: env::var("TMDB_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            tmdb_base_url: env_or("TMDB_BASE_URL", &defaults.tmdb_base_url),
            search_language: env_or("REELSCORE_SEARCH_LANGUAGE", &defaults.search_language),
            detail_language: env_or("REELSCORE_DETAIL_LANGUAGE", &defaults.detail_language),
            bind_address: env_or("REELSCORE_BIND_ADDRESS", &defaults.bind_address),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
