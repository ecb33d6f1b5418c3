//! In-memory document store
//!
//! Process-local [`DocumentStore`] used by the test suite and by server
//! runs without a managed store wired in. Behaves like the managed store:
//! `add` assigns a fresh document ID, and reads return the record with its
//! ID filled in.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Critique, User};
use crate::ports::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    critiques: RwLock<HashMap<String, Critique>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }
}

fn lock_poisoned<T>(_: T) -> Error {
    Error::database("store lock poisoned")
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_user(&self, user: &User) -> Result<String> {
        let id = Self::next_id();
        let mut stored = user.clone();
        stored.id = Some(id.clone());
        self.users
            .write()
            .map_err(lock_poisoned)?
            .insert(id.clone(), stored);
        Ok(id)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().map_err(lock_poisoned)?.get(id).cloned())
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .map_err(lock_poisoned)?
            .values()
            .cloned()
            .collect())
    }

    async fn get_users_by_nick(&self, nick: &str) -> Result<Vec<User>> {
        Ok(self
            .users
            .read()
            .map_err(lock_poisoned)?
            .values()
            .filter(|user| user.nick == nick)
            .cloned()
            .collect())
    }

    async fn set_user(&self, id: &str, user: &User) -> Result<()> {
        let mut stored = user.clone();
        stored.id = Some(id.to_string());
        self.users
            .write()
            .map_err(lock_poisoned)?
            .insert(id.to_string(), stored);
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.users.write().map_err(lock_poisoned)?.remove(id);
        Ok(())
    }

    async fn add_critique(&self, critique: &Critique) -> Result<String> {
        let id = Self::next_id();
        let mut stored = critique.clone();
        stored.id = Some(id.clone());
        self.critiques
            .write()
            .map_err(lock_poisoned)?
            .insert(id.clone(), stored);
        Ok(id)
    }

    async fn get_critique(&self, id: &str) -> Result<Option<Critique>> {
        Ok(self
            .critiques
            .read()
            .map_err(lock_poisoned)?
            .get(id)
            .cloned())
    }

    async fn get_critiques(&self) -> Result<Vec<Critique>> {
        Ok(self
            .critiques
            .read()
            .map_err(lock_poisoned)?
            .values()
            .cloned()
            .collect())
    }

    async fn get_critiques_by_user(&self, user_id: &str) -> Result<Vec<Critique>> {
        Ok(self
            .critiques
            .read()
            .map_err(lock_poisoned)?
            .values()
            .filter(|critique| critique.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_critiques_by_movie(&self, movie_id: i64) -> Result<Vec<Critique>> {
        Ok(self
            .critiques
            .read()
            .map_err(lock_poisoned)?
            .values()
            .filter(|critique| critique.movie_id == movie_id)
            .cloned()
            .collect())
    }

    async fn get_recent_critiques(&self, limit: usize) -> Result<Vec<Critique>> {
        let mut critiques: Vec<Critique> = self
            .critiques
            .read()
            .map_err(lock_poisoned)?
            .values()
            .cloned()
            .collect();
        // Newest first; records without a timestamp sort last.
        critiques.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        critiques.truncate(limit);
        Ok(critiques)
    }

    async fn set_critique(&self, id: &str, critique: &Critique) -> Result<()> {
        let mut stored = critique.clone();
        stored.id = Some(id.to_string());
        self.critiques
            .write()
            .map_err(lock_poisoned)?
            .insert(id.to_string(), stored);
        Ok(())
    }
}
