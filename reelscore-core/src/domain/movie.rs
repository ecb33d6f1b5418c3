//! Catalog movie records
//!
//! [`CatalogMovie`] mirrors the external catalog's wire format for both the
//! search and detail endpoints; fields one endpoint omits are defaulted.
//! [`MovieSummary`] is the enriched projection returned to callers. Nothing
//! here is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL for catalog images; wire paths are relative to this.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATE_OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// One movie as the catalog API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogMovie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub adult: bool,
}

/// A search result after enrichment: the localized search hit merged with
/// its reference-language detail record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub popularity: f64,
    pub vote_average: f64,
    pub vote_count: i64,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub original_language: Option<String>,
    pub genre_ids: Vec<i64>,
}

impl MovieSummary {
    /// Merge policy: localized title/overview win when present and
    /// non-empty; release date, image paths and original language always
    /// come from the detail record.
    pub fn merged(local: &CatalogMovie, detail: &CatalogMovie) -> Self {
        Self {
            id: local.id,
            title: prefer(&local.title, &detail.title),
            original_title: detail.original_title.clone(),
            overview: prefer(&local.overview, &detail.overview),
            release_date: detail
                .release_date
                .as_deref()
                .and_then(format_release_date),
            popularity: local.popularity,
            vote_average: local.vote_average,
            vote_count: local.vote_count,
            poster_url: image_url(detail.poster_path.as_deref()),
            backdrop_url: image_url(detail.backdrop_path.as_deref()),
            original_language: detail.original_language.clone(),
            genre_ids: local.genre_ids.clone(),
        }
    }
}

fn prefer(local: &Option<String>, fallback: &Option<String>) -> Option<String> {
    match local {
        Some(value) if !value.is_empty() => Some(value.clone()),
        _ => fallback.clone(),
    }
}

/// Reformat the catalog's `yyyy-mm-dd` release date to `dd-mm-yyyy`. A
/// value that does not parse is passed through untouched; blank input maps
/// to `None`.
pub fn format_release_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT) {
        Ok(date) => Some(date.format(DATE_OUTPUT_FORMAT).to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

/// Rewrite a relative image path into an absolute CDN URL. An absent path
/// stays absent, never a dangling base URL.
pub fn image_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE_URL}{p}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64) -> CatalogMovie {
        CatalogMovie {
            id,
            ..CatalogMovie::default()
        }
    }

    #[test]
    fn test_release_date_is_reformatted() {
        assert_eq!(
            format_release_date("1999-10-15"),
            Some("15-10-1999".to_string())
        );
    }

    #[test]
    fn test_unparseable_release_date_passes_through() {
        assert_eq!(
            format_release_date("october 1999"),
            Some("october 1999".to_string())
        );
    }

    #[test]
    fn test_blank_release_date_is_dropped() {
        assert_eq!(format_release_date("  "), None);
        assert_eq!(format_release_date(""), None);
    }

    #[test]
    fn test_image_url_prefixes_base() {
        assert_eq!(
            image_url(Some("/abc.jpg")),
            Some(format!("{IMAGE_BASE_URL}/abc.jpg"))
        );
        assert_eq!(image_url(None), None);
    }

    #[test]
    fn test_merge_prefers_local_title_and_overview() {
        let mut local = movie(550);
        local.title = Some("El club de la lucha".to_string());
        local.overview = Some("Un oficinista insomne...".to_string());
        local.genre_ids = vec![18];

        let mut detail = movie(550);
        detail.title = Some("Fight Club".to_string());
        detail.original_title = Some("Fight Club".to_string());
        detail.overview = Some("An insomniac office worker...".to_string());
        detail.release_date = Some("1999-10-15".to_string());
        detail.poster_path = Some("/poster.jpg".to_string());
        detail.original_language = Some("en".to_string());

        let summary = MovieSummary::merged(&local, &detail);
        assert_eq!(summary.title.as_deref(), Some("El club de la lucha"));
        assert_eq!(summary.overview.as_deref(), Some("Un oficinista insomne..."));
        assert_eq!(summary.original_title.as_deref(), Some("Fight Club"));
        assert_eq!(summary.release_date.as_deref(), Some("15-10-1999"));
        assert_eq!(
            summary.poster_url,
            Some(format!("{IMAGE_BASE_URL}/poster.jpg"))
        );
        assert_eq!(summary.backdrop_url, None);
        assert_eq!(summary.genre_ids, vec![18]);
    }

    #[test]
    fn test_merge_falls_back_to_detail_when_local_fields_empty() {
        let mut local = movie(550);
        local.title = Some(String::new());

        let mut detail = movie(550);
        detail.title = Some("Fight Club".to_string());
        detail.overview = Some("An insomniac office worker...".to_string());

        let summary = MovieSummary::merged(&local, &detail);
        assert_eq!(summary.title.as_deref(), Some("Fight Club"));
        assert_eq!(
            summary.overview.as_deref(),
            Some("An insomniac office worker...")
        );
    }

    #[test]
    fn test_catalog_movie_deserializes_from_wire_format() {
        let raw = r#"{
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "overview": "An insomniac office worker...",
            "release_date": "1999-10-15",
            "popularity": 61.416,
            "vote_average": 8.433,
            "vote_count": 26280,
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": "/fCayJrkfRaCRCTh8GqN30f8oyQF.jpg",
            "original_language": "en",
            "genre_ids": [18, 53],
            "adult": false
        }"#;
        let movie: CatalogMovie = serde_json::from_str(raw).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.genre_ids, vec![18, 53]);
        assert!(!movie.adult);
    }

    #[test]
    fn test_catalog_movie_tolerates_sparse_search_records() {
        let movie: CatalogMovie = serde_json::from_str(r#"{"id": 550}"#).unwrap();
        assert_eq!(movie.title, None);
        assert_eq!(movie.vote_count, 0);
        assert!(movie.genre_ids.is_empty());
    }
}
