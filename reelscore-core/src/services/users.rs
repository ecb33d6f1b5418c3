//! User service - user lifecycle and friendship graph

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{validate_image_url, User};
use crate::ports::DocumentStore;

/// User service for account lifecycle and social-graph operations.
pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Get all users.
    pub async fn get_all(&self) -> Result<Vec<User>> {
        self.store.get_users().await
    }

    /// Point lookup; absence is a plain `None`, not an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        self.store.get_user(id).await
    }

    /// Exact-match nick lookup (case-sensitive). Zero matches is an empty
    /// list, not an error.
    pub async fn get_by_nick(&self, nick: &str) -> Result<Vec<User>> {
        self.store.get_users_by_nick(nick).await
    }

    /// Register a new user. The nick must be unique across all users; the
    /// check is a read issued before the write, not atomic with it, so two
    /// concurrent registrations of the same nick can still race.
    ///
    /// Returns the record exactly as persisted, assigned ID included.
    pub async fn add(&self, user: User) -> Result<User> {
        user.validate()?;

        if !self.store.get_users_by_nick(&user.nick).await?.is_empty() {
            warn!(nick = %user.nick, "registration attempt with duplicate nick");
            return Err(Error::conflict(format!(
                "nick '{}' is already registered",
                user.nick
            )));
        }

        let id = self.store.add_user(&user).await?;
        let created = self.store.get_user(&id).await?.ok_or_else(|| {
            Error::database(format!("user {id} was created but could not be read back"))
        })?;
        info!(user_id = %id, "user registered");
        Ok(created)
    }

    /// Full-document update. Fails when the user does not exist or the new
    /// nick is held by a different user; keeping one's own nick is fine.
    pub async fn update(&self, id: &str, mut user: User) -> Result<User> {
        user.validate()?;

        if self.store.get_user(id).await?.is_none() {
            warn!(user_id = %id, "update of nonexistent user");
            return Err(Error::not_found(format!("no user with id {id}")));
        }
        self.ensure_nick_free(id, &user.nick).await?;

        user.id = Some(id.to_string());
        self.store.set_user(id, &user).await?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Delete by ID. Returns whether a user existed to delete; deleting a
    /// nonexistent user is reported, not raised.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.store.get_user(id).await?.is_none() {
            warn!(user_id = %id, "delete of nonexistent user");
            return Ok(false);
        }
        self.store.delete_user(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(true)
    }

    /// Change only the nick, under the same uniqueness rule as `update`.
    pub async fn change_nick(&self, id: &str, new_nick: &str) -> Result<User> {
        if new_nick.trim().is_empty() {
            return Err(Error::validation("nick must not be blank"));
        }
        let mut user = self.require_user(id).await?;
        self.ensure_nick_free(id, new_nick).await?;

        user.nick = new_nick.to_string();
        self.store.set_user(id, &user).await?;
        info!(user_id = %id, nick = %new_nick, "nick changed");
        Ok(user)
    }

    /// Set or clear the profile-image URL; no other field changes.
    pub async fn change_profile_image(&self, id: &str, image: Option<String>) -> Result<User> {
        if let Some(url) = image.as_deref() {
            validate_image_url(url)?;
        }
        let mut user = self.require_user(id).await?;
        user.profile_image = image;
        self.store.set_user(id, &user).await?;
        info!(user_id = %id, "profile image changed");
        Ok(user)
    }

    /// Mutual friends of two users: the intersection of both friend lists.
    /// The two users themselves are never counted, even if one appears in
    /// the other's list. `None` unless both users exist.
    pub async fn count_mutual_friends(
        &self,
        user_id: &str,
        friend_id: &str,
    ) -> Result<Option<usize>> {
        let Some(user) = self.store.get_user(user_id).await? else {
            return Ok(None);
        };
        let Some(friend) = self.store.get_user(friend_id).await? else {
            return Ok(None);
        };

        let mine: HashSet<&str> = user.friends.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = friend.friends.iter().map(String::as_str).collect();

        let count = mine
            .intersection(&theirs)
            .copied()
            .filter(|id| *id != user_id && *id != friend_id)
            .count();
        Ok(Some(count))
    }

    /// Add `friend_id` to `user_id`'s friend list. Idempotent; an existing
    /// friendship succeeds without duplicating the entry. Only the
    /// initiating user's list is touched.
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<()> {
        if user_id == friend_id {
            warn!(user_id = %user_id, "user tried to befriend themselves");
            return Err(Error::conflict("cannot add yourself as a friend"));
        }
        let mut user = self.require_user(user_id).await?;
        self.require_user(friend_id).await?;

        if user.friends.iter().any(|id| id == friend_id) {
            return Ok(());
        }
        user.friends.push(friend_id.to_string());
        self.store.set_user(user_id, &user).await?;
        info!(user_id = %user_id, friend_id = %friend_id, "friend added");
        Ok(())
    }

    /// Remove `friend_id` from `user_id`'s friend list. A friendship that
    /// did not exist is reported as not-found, distinct from a missing user.
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<()> {
        let mut user = self.require_user(user_id).await?;
        self.require_user(friend_id).await?;

        let before = user.friends.len();
        user.friends.retain(|id| id != friend_id);
        if user.friends.len() == before {
            return Err(Error::not_found(format!(
                "no friendship between {user_id} and {friend_id}"
            )));
        }
        self.store.set_user(user_id, &user).await?;
        info!(user_id = %user_id, friend_id = %friend_id, "friend removed");
        Ok(())
    }

    async fn require_user(&self, id: &str) -> Result<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("no user with id {id}")))
    }

    /// Uniqueness rule shared by `update` and `change_nick`: the nick may
    /// only be held by the user being updated.
    async fn ensure_nick_free(&self, user_id: &str, nick: &str) -> Result<()> {
        let holders = self.store.get_users_by_nick(nick).await?;
        if holders.iter().any(|u| u.id.as_deref() != Some(user_id)) {
            warn!(user_id = %user_id, nick = %nick, "nick already in use by another user");
            return Err(Error::conflict(format!("nick '{nick}' is already in use")));
        }
        Ok(())
    }
}
