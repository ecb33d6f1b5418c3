//! Movie catalog port
//!
//! Read-only interface to the external movie metadata service. The search
//! service never sees the concrete HTTP client behind it.

use async_trait::async_trait;

use crate::domain::movie::CatalogMovie;
use crate::domain::result::Result;

/// External movie catalog: text search plus per-movie detail lookup.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Text search in the given language. Returns the raw result page,
    /// unfiltered.
    async fn search(&self, query: &str, language: &str) -> Result<Vec<CatalogMovie>>;

    /// Detail lookup for one movie. `Ok(None)` when the catalog reports the
    /// ID unknown (client or server error status).
    async fn detail(&self, movie_id: i64, language: &str) -> Result<Option<CatalogMovie>>;
}
