//! Reelscore Core - Business logic for the movie-review backend
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Critique, catalog records)
//! - **ports**: Trait definitions for external dependencies (DocumentStore, MovieCatalog)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (TMDb client, in-memory store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;

use adapters::memory::MemoryStore;
use adapters::tmdb::TmdbCatalog;
use config::Config;
use ports::{DocumentStore, MovieCatalog};
use services::{CritiqueService, MovieSearchService, UserService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Critique, MovieAverage, MovieSummary, User};

/// Main context for reelscore operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration, the document store handle and all services.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub users: UserService,
    pub critiques: CritiqueService,
    pub movies: MovieSearchService,
}

impl AppContext {
    /// Create a context backed by the in-process store.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a context over an existing store implementation. The catalog
    /// client is only constructed when an API key is configured; without
    /// one, movie search degrades to empty results.
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let catalog: Option<Arc<dyn MovieCatalog>> = match &config.tmdb_api_key {
            Some(key) => Some(Arc::new(TmdbCatalog::new(&config.tmdb_base_url, key)?)),
            None => None,
        };

        let users = UserService::new(Arc::clone(&store));
        let critiques = CritiqueService::new(Arc::clone(&store));
        let movies = MovieSearchService::new(
            catalog,
            config.search_language.clone(),
            config.detail_language.clone(),
        );

        Ok(Self {
            config,
            store,
            users,
            critiques,
            movies,
        })
    }
}
