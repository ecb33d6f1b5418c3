//! Critique service - critique lifecycle and cross-critique aggregation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::critique::{validate_rating, Critique, MovieAverage};
use crate::domain::result::{Error, Result};
use crate::ports::DocumentStore;

/// Critique service for critique lifecycle and ranking/dedup aggregations.
///
/// The aggregations fetch the whole collection and reduce in memory on
/// every call. That is O(total critiques) per request and is the first
/// thing to revisit if the collection grows.
pub struct CritiqueService {
    store: Arc<dyn DocumentStore>,
}

impl CritiqueService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Point lookup; absence is a plain `None`, not an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Critique>> {
        self.store.get_critique(id).await
    }

    /// All critiques written by one user.
    pub async fn get_by_user(&self, user_id: &str) -> Result<Vec<Critique>> {
        self.store.get_critiques_by_user(user_id).await
    }

    /// All critiques of one movie.
    pub async fn get_by_movie(&self, movie_id: i64) -> Result<Vec<Critique>> {
        self.store.get_critiques_by_movie(movie_id).await
    }

    /// Get all critiques.
    pub async fn get_all(&self) -> Result<Vec<Critique>> {
        self.store.get_critiques().await
    }

    /// Create a critique with a store-assigned ID. The creation timestamp
    /// is stamped here; a caller-supplied one is ignored. The record is
    /// read back after the write and returned as persisted.
    pub async fn add(&self, mut critique: Critique) -> Result<Critique> {
        critique.validate()?;
        critique.id = None;
        critique.created_at = Some(Utc::now());

        let id = self.store.add_critique(&critique).await?;
        let created = self.store.get_critique(&id).await?.ok_or_else(|| {
            Error::database(format!(
                "critique {id} was created but could not be read back"
            ))
        })?;
        info!(critique_id = %id, movie_id = critique.movie_id, "critique created");
        Ok(created)
    }

    /// Rate a movie: one critique per user per movie, last write wins. The
    /// document ID is derived from the user and movie IDs, so repeated
    /// ratings overwrite in place.
    pub async fn rate(
        &self,
        user_id: &str,
        movie_id: i64,
        rating: i32,
        comment: &str,
    ) -> Result<Critique> {
        let mut critique = Critique::new(user_id, movie_id, rating, comment);
        critique.validate()?;
        critique.created_at = Some(Utc::now());

        let id = Critique::rating_doc_id(user_id, movie_id);
        self.store.set_critique(&id, &critique).await?;
        let stored = self.store.get_critique(&id).await?.ok_or_else(|| {
            Error::database(format!(
                "critique {id} was written but could not be read back"
            ))
        })?;
        info!(critique_id = %id, movie_id, "movie rated");
        Ok(stored)
    }

    /// The critique a user wrote for one movie through the rating entry
    /// point, if any.
    pub async fn get_by_user_and_movie(
        &self,
        user_id: &str,
        movie_id: i64,
    ) -> Result<Option<Critique>> {
        self.store
            .get_critique(&Critique::rating_doc_id(user_id, movie_id))
            .await
    }

    /// Partial edit: only the provided fields change, the rest of the
    /// record is untouched. The document is rewritten in full underneath.
    pub async fn edit(
        &self,
        id: &str,
        comment: Option<String>,
        rating: Option<i32>,
    ) -> Result<Critique> {
        let mut critique = self.store.get_critique(id).await?.ok_or_else(|| {
            warn!(critique_id = %id, "edit of nonexistent critique");
            Error::not_found(format!("no critique with id {id}"))
        })?;

        if let Some(comment) = comment {
            if comment.trim().is_empty() {
                return Err(Error::validation("comment must not be blank"));
            }
            critique.comment = comment;
        }
        if let Some(rating) = rating {
            validate_rating(rating)?;
            critique.rating = rating;
        }

        self.store.set_critique(id, &critique).await?;
        info!(critique_id = %id, "critique edited");
        Ok(critique)
    }

    /// The `count` most recent critiques, newest first. Movies may repeat;
    /// `count` must be positive.
    pub async fn get_recent(&self, count: i64) -> Result<Vec<Critique>> {
        if count <= 0 {
            return Err(Error::validation(format!(
                "count must be positive, got {count}"
            )));
        }
        self.store.get_recent_critiques(count as usize).await
    }

    /// The most recent critique for each movie, newest first: at most one
    /// entry per movie ID. `count <= 0` returns every movie. Records
    /// without a timestamp lose to timestamped ones; equal timestamps keep
    /// the record seen first in store order.
    pub async fn get_recent_distinct_by_movie(&self, count: i64) -> Result<Vec<Critique>> {
        let critiques = self.store.get_critiques().await?;

        let mut latest: HashMap<i64, Critique> = HashMap::new();
        for critique in critiques {
            let newer = match latest.get(&critique.movie_id) {
                Some(current) => critique.created_at > current.created_at,
                None => true,
            };
            if newer {
                latest.insert(critique.movie_id, critique);
            }
        }

        let mut distinct: Vec<Critique> = latest.into_values().collect();
        distinct.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if count > 0 {
            distinct.truncate(count as usize);
        }
        Ok(distinct)
    }

    /// Movies ranked by mean rating, descending. Ties break by movie ID
    /// ascending so repeated calls return a stable order. `count <= 0`
    /// returns the full ranking.
    pub async fn get_average_ratings_ranked(&self, count: i64) -> Result<Vec<MovieAverage>> {
        let critiques = self.store.get_critiques().await?;

        let mut totals: HashMap<i64, (i64, u32)> = HashMap::new();
        for critique in &critiques {
            let entry = totals.entry(critique.movie_id).or_insert((0, 0));
            entry.0 += i64::from(critique.rating);
            entry.1 += 1;
        }

        let mut ranking: Vec<MovieAverage> = totals
            .into_iter()
            .map(|(movie_id, (sum, n))| MovieAverage {
                movie_id,
                average_rating: sum as f64 / f64::from(n),
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.movie_id.cmp(&b.movie_id))
        });
        if count > 0 {
            ranking.truncate(count as usize);
        }
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn service() -> CritiqueService {
        CritiqueService::new(Arc::new(MemoryStore::new()))
    }

    /// Seed a critique with a controlled timestamp, bypassing the
    /// server-side stamping.
    async fn seed(
        service: &CritiqueService,
        doc_id: &str,
        user_id: &str,
        movie_id: i64,
        rating: i32,
        ts: i64,
    ) {
        let mut critique = Critique::new(user_id, movie_id, rating, "seeded");
        critique.created_at = Some(Utc.timestamp_opt(ts, 0).unwrap());
        service.store.set_critique(doc_id, &critique).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_stamps_timestamp_and_ignores_caller_supplied_one() {
        let service = service();
        let mut critique = Critique::new("u1", 7, 8, "great");
        critique.created_at = Some(Utc.timestamp_opt(0, 0).unwrap());

        let created = service.add(critique).await.unwrap();
        assert!(created.id.is_some());
        let stamped = created.created_at.expect("timestamp must be stamped");
        assert!(stamped > Utc.timestamp_opt(0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_add_rejects_incomplete_critiques() {
        let service = service();
        assert!(service.add(Critique::new("", 7, 8, "x")).await.is_err());
        assert!(service.add(Critique::new("u1", 0, 8, "x")).await.is_err());
        assert!(service.add(Critique::new("u1", 7, 0, "x")).await.is_err());
        assert!(service.add(Critique::new("u1", 7, 11, "x")).await.is_err());
        assert!(service.add(Critique::new("u1", 7, 8, " ")).await.is_err());
    }

    #[tokio::test]
    async fn test_rate_overwrites_previous_rating_for_same_user_and_movie() {
        let service = service();
        service.rate("u1", 7, 3, "meh").await.unwrap();
        let second = service.rate("u1", 7, 9, "rewatched, brilliant").await.unwrap();

        assert_eq!(second.id.as_deref(), Some("u1_7"));
        let all = service.get_by_movie(7).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rating, 9);

        let found = service.get_by_user_and_movie("u1", 7).await.unwrap();
        assert_eq!(found.unwrap().comment, "rewatched, brilliant");
    }

    #[tokio::test]
    async fn test_edit_is_partial() {
        let service = service();
        let created = service.add(Critique::new("u1", 7, 8, "great")).await.unwrap();
        let id = created.id.unwrap();

        let edited = service
            .edit(&id, None, Some(5))
            .await
            .unwrap();
        assert_eq!(edited.rating, 5);
        assert_eq!(edited.comment, "great");

        let edited = service
            .edit(&id, Some("changed my mind".to_string()), None)
            .await
            .unwrap();
        assert_eq!(edited.rating, 5);
        assert_eq!(edited.comment, "changed my mind");
    }

    #[tokio::test]
    async fn test_edit_validates_provided_fields() {
        let service = service();
        let created = service.add(Critique::new("u1", 7, 8, "great")).await.unwrap();
        let id = created.id.unwrap();

        assert!(matches!(
            service.edit(&id, Some("  ".to_string()), None).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service.edit(&id, None, Some(0)).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service.edit("missing", None, Some(5)).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_recent_rejects_non_positive_count() {
        let service = service();
        assert!(matches!(
            service.get_recent(0).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            service.get_recent(-3).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_recent_distinct_keeps_latest_critique_per_movie() {
        let service = service();
        seed(&service, "c1", "u1", 7, 8, 100).await;
        seed(&service, "c2", "u2", 7, 10, 200).await;
        seed(&service, "c3", "u1", 9, 4, 300).await;

        let distinct = service.get_recent_distinct_by_movie(10).await.unwrap();
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0].movie_id, 9);
        assert_eq!(distinct[0].rating, 4);
        assert_eq!(distinct[1].movie_id, 7);
        assert_eq!(distinct[1].rating, 10);
        assert_eq!(distinct[1].user_id, "u2");
    }

    #[tokio::test]
    async fn test_recent_distinct_honors_count_and_zero_means_all() {
        let service = service();
        seed(&service, "c1", "u1", 7, 8, 100).await;
        seed(&service, "c2", "u2", 8, 6, 200).await;
        seed(&service, "c3", "u3", 9, 4, 300).await;

        let top_one = service.get_recent_distinct_by_movie(1).await.unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].movie_id, 9);

        let all = service.get_recent_distinct_by_movie(0).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_recent_distinct_untimestamped_records_lose() {
        let service = service();
        let mut untimed = Critique::new("u1", 7, 2, "old record");
        untimed.created_at = None;
        service.store.set_critique("c0", &untimed).await.unwrap();
        seed(&service, "c1", "u2", 7, 9, 100).await;

        let distinct = service.get_recent_distinct_by_movie(10).await.unwrap();
        assert_eq!(distinct.len(), 1);
        assert_eq!(distinct[0].rating, 9);
    }

    #[tokio::test]
    async fn test_average_ranking_orders_by_mean_descending() {
        let service = service();
        seed(&service, "c1", "u1", 7, 8, 100).await;
        seed(&service, "c2", "u2", 7, 10, 200).await;
        seed(&service, "c3", "u1", 9, 4, 300).await;

        let ranking = service.get_average_ratings_ranked(10).await.unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].movie_id, 7);
        assert!((ranking[0].average_rating - 9.0).abs() < f64::EPSILON);
        assert_eq!(ranking[1].movie_id, 9);
        assert!((ranking[1].average_rating - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_average_ranking_ties_break_by_movie_id() {
        let service = service();
        seed(&service, "c1", "u1", 12, 6, 100).await;
        seed(&service, "c2", "u2", 3, 6, 200).await;

        let ranking = service.get_average_ratings_ranked(0).await.unwrap();
        assert_eq!(ranking[0].movie_id, 3);
        assert_eq!(ranking[1].movie_id, 12);
    }

    #[tokio::test]
    async fn test_average_ranking_truncates_to_count() {
        let service = service();
        seed(&service, "c1", "u1", 1, 9, 100).await;
        seed(&service, "c2", "u1", 2, 7, 200).await;
        seed(&service, "c3", "u1", 3, 5, 300).await;

        let top_two = service.get_average_ratings_ranked(2).await.unwrap();
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0].movie_id, 1);
        assert_eq!(top_two[1].movie_id, 2);
    }
}
