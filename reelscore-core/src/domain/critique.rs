//! Critique domain model and derived aggregates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Canonical rating bounds, inclusive. Applied identically at every write
/// path (create, rate, edit).
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

/// One user's rating and comment for one movie, as stored in the
/// `critiques` collection.
///
/// `id` is the store-assigned document ID, except for records written
/// through the rating entry point, where it is derived from the user and
/// movie IDs (see [`Critique::rating_doc_id`]). `created_at` is stamped
/// server-side on every write; records predating the timestamp field may
/// carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    /// External catalog movie ID.
    pub movie_id: i64,
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Critique {
    pub fn new(
        user_id: impl Into<String>,
        movie_id: i64,
        rating: i32,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            movie_id,
            rating,
            comment: comment.into(),
            created_at: None,
        }
    }

    /// Deterministic document ID for the rating entry point: one critique
    /// per user per movie, last write wins.
    pub fn rating_doc_id(user_id: &str, movie_id: i64) -> String {
        format!("{user_id}_{movie_id}")
    }

    /// Required-field and range checks applied before any write.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::validation("user id must not be blank"));
        }
        if self.movie_id <= 0 {
            return Err(Error::validation("movie id must be set"));
        }
        validate_rating(self.rating)?;
        if self.comment.trim().is_empty() {
            return Err(Error::validation("comment must not be blank"));
        }
        Ok(())
    }
}

/// Range check shared with the partial-edit path.
pub fn validate_rating(rating: i32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

/// Per-movie mean rating, computed on demand from the full critique set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieAverage {
    pub movie_id: i64,
    pub average_rating: f64,
}
