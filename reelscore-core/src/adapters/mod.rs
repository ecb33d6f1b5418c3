//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - TMDb HTTP client for MovieCatalog
//! - In-memory store for DocumentStore (tests and standalone runs)

pub mod memory;
pub mod tmdb;
