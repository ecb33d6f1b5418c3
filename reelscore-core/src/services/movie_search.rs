//! Movie search service - external catalog queries, filtering and enrichment

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::warn;

use crate::domain::movie::{CatalogMovie, MovieSummary};
use crate::domain::result::{Error, Result};
use crate::ports::MovieCatalog;

/// Upper bound on concurrent detail lookups per search, so one incoming
/// request cannot flood the upstream API.
const ENRICH_CONCURRENCY: usize = 5;

/// Movie search service: queries the external catalog, drops adult results
/// and enriches each hit with a reference-language detail lookup.
pub struct MovieSearchService {
    /// `None` when no API credential is configured; every search then
    /// degrades to an empty result instead of failing.
    catalog: Option<Arc<dyn MovieCatalog>>,
    search_language: String,
    detail_language: String,
}

impl MovieSearchService {
    pub fn new(
        catalog: Option<Arc<dyn MovieCatalog>>,
        search_language: impl Into<String>,
        detail_language: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            search_language: search_language.into(),
            detail_language: detail_language.into(),
        }
    }

    /// Search the catalog by title. Adult-flagged hits are dropped before
    /// enrichment; result order carries no guarantee. A blank query or a
    /// missing credential yields an empty list.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let Some(catalog) = &self.catalog else {
            warn!("movie search attempted without a configured catalog API key");
            return Ok(Vec::new());
        };
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let hits = catalog.search(query, &self.search_language).await?;
        let catalog = catalog.as_ref();

        stream::iter(hits.into_iter().filter(|movie| !movie.adult))
            .map(|movie| self.enrich(catalog, movie))
            .buffer_unordered(ENRICH_CONCURRENCY)
            .try_collect()
            .await
    }

    /// Look one movie up by catalog ID. An ID the catalog does not know is
    /// an empty result, not an error.
    pub async fn search_by_id(&self, movie_id: i64) -> Result<Vec<MovieSummary>> {
        let Some(catalog) = &self.catalog else {
            warn!("movie lookup attempted without a configured catalog API key");
            return Ok(Vec::new());
        };

        match catalog.detail(movie_id, &self.search_language).await? {
            Some(movie) => Ok(vec![self.enrich(catalog.as_ref(), movie).await?]),
            None => Ok(Vec::new()),
        }
    }

    /// Fill in the fields the search response lacks with a detail lookup in
    /// the reference language, then apply the merge policy.
    async fn enrich(&self, catalog: &dyn MovieCatalog, movie: CatalogMovie) -> Result<MovieSummary> {
        let detail = catalog
            .detail(movie.id, &self.detail_language)
            .await?
            .ok_or_else(|| {
                Error::catalog(format!("no detail record for movie {}", movie.id))
            })?;
        Ok(MovieSummary::merged(&movie, &detail))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;

    /// Canned catalog: search hits per query, detail records per (id,
    /// language).
    #[derive(Default)]
    struct FakeCatalog {
        search_results: HashMap<String, Vec<CatalogMovie>>,
        details: HashMap<(i64, String), CatalogMovie>,
    }

    impl FakeCatalog {
        fn with_search(mut self, query: &str, results: Vec<CatalogMovie>) -> Self {
            self.search_results.insert(query.to_string(), results);
            self
        }

        fn with_detail(mut self, language: &str, movie: CatalogMovie) -> Self {
            self.details.insert((movie.id, language.to_string()), movie);
            self
        }
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        async fn search(&self, query: &str, _language: &str) -> Result<Vec<CatalogMovie>> {
            Ok(self.search_results.get(query).cloned().unwrap_or_default())
        }

        async fn detail(&self, movie_id: i64, language: &str) -> Result<Option<CatalogMovie>> {
            Ok(self
                .details
                .get(&(movie_id, language.to_string()))
                .cloned())
        }
    }

    fn service(catalog: FakeCatalog) -> MovieSearchService {
        MovieSearchService::new(Some(Arc::new(catalog)), "es-ES", "en-US")
    }

    fn local_movie(id: i64, title: &str) -> CatalogMovie {
        CatalogMovie {
            id,
            title: Some(title.to_string()),
            ..CatalogMovie::default()
        }
    }

    fn detail_movie(id: i64, title: &str) -> CatalogMovie {
        CatalogMovie {
            id,
            title: Some(title.to_string()),
            original_title: Some(title.to_string()),
            release_date: Some("1999-10-15".to_string()),
            original_language: Some("en".to_string()),
            ..CatalogMovie::default()
        }
    }

    #[tokio::test]
    async fn test_search_without_api_key_returns_empty() {
        let service = MovieSearchService::new(None, "es-ES", "en-US");
        assert!(service.search_by_name("fight club").await.unwrap().is_empty());
        assert!(service.search_by_id(550).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_returns_empty() {
        let service = service(FakeCatalog::default());
        assert!(service.search_by_name("").await.unwrap().is_empty());
        assert!(service.search_by_name("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_drops_adult_results() {
        let mut adult = local_movie(1, "skip me");
        adult.adult = true;

        let catalog = FakeCatalog::default()
            .with_search("club", vec![local_movie(550, "El club de la lucha"), adult])
            .with_detail("en-US", detail_movie(550, "Fight Club"));

        let results = service(catalog).search_by_name("club").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 550);
    }

    #[tokio::test]
    async fn test_search_merges_local_and_detail_fields() {
        let catalog = FakeCatalog::default()
            .with_search("club", vec![local_movie(550, "El club de la lucha")])
            .with_detail("en-US", detail_movie(550, "Fight Club"));

        let results = service(catalog).search_by_name("club").await.unwrap();
        assert_eq!(results[0].title.as_deref(), Some("El club de la lucha"));
        assert_eq!(results[0].original_title.as_deref(), Some("Fight Club"));
        assert_eq!(results[0].release_date.as_deref(), Some("15-10-1999"));
        assert_eq!(results[0].original_language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_search_fails_when_enrichment_record_is_missing() {
        let catalog = FakeCatalog::default()
            .with_search("club", vec![local_movie(550, "El club de la lucha")]);

        let err = service(catalog).search_by_name("club").await.unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[tokio::test]
    async fn test_search_by_id_unknown_movie_is_empty_not_error() {
        let service = service(FakeCatalog::default());
        assert!(service.search_by_id(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_by_id_returns_enriched_singleton() {
        let catalog = FakeCatalog::default()
            .with_detail("es-ES", local_movie(550, "El club de la lucha"))
            .with_detail("en-US", detail_movie(550, "Fight Club"));

        let results = service(catalog).search_by_id(550).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("El club de la lucha"));
        assert_eq!(results[0].original_title.as_deref(), Some("Fight Club"));
    }
}
