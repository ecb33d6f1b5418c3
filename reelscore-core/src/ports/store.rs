//! Document store port - database abstraction

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{Critique, User};

/// Document store abstraction over the two persisted collections.
///
/// The operation set mirrors what the managed document database offers:
/// point get, full-collection get, equality-filter queries, one
/// order-by-plus-limit query, add with a store-assigned ID, full-document
/// overwrite, delete. There are deliberately no transactions and no
/// conditional writes, so every read-modify-write in the service layer is
/// non-atomic by construction.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // === Users ===

    /// Insert a user, returning the store-assigned document ID.
    async fn add_user(&self, user: &User) -> Result<String>;

    /// Point lookup; `Ok(None)` when the document does not exist.
    async fn get_user(&self, id: &str) -> Result<Option<User>>;

    /// Get all users.
    async fn get_users(&self) -> Result<Vec<User>>;

    /// Exact-match query on the `nick` field (case-sensitive).
    async fn get_users_by_nick(&self, nick: &str) -> Result<Vec<User>>;

    /// Overwrite the full document at `id` (upsert semantics).
    async fn set_user(&self, id: &str, user: &User) -> Result<()>;

    /// Delete the document at `id`; deleting an absent document is not an
    /// error.
    async fn delete_user(&self, id: &str) -> Result<()>;

    // === Critiques ===

    /// Insert a critique, returning the store-assigned document ID.
    async fn add_critique(&self, critique: &Critique) -> Result<String>;

    /// Point lookup; `Ok(None)` when the document does not exist.
    async fn get_critique(&self, id: &str) -> Result<Option<Critique>>;

    /// Get all critiques.
    async fn get_critiques(&self) -> Result<Vec<Critique>>;

    /// Exact-match query on the `user_id` field.
    async fn get_critiques_by_user(&self, user_id: &str) -> Result<Vec<Critique>>;

    /// Exact-match query on the `movie_id` field.
    async fn get_critiques_by_movie(&self, movie_id: i64) -> Result<Vec<Critique>>;

    /// The `limit` most recent critiques, ordered by creation time
    /// descending.
    async fn get_recent_critiques(&self, limit: usize) -> Result<Vec<Critique>>;

    /// Overwrite the full document at `id` (upsert semantics).
    async fn set_critique(&self, id: &str, critique: &Critique) -> Result<()>;
}
