//! User domain model

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

/// A registered user as stored in the `users` collection.
///
/// `id` is the store-assigned document ID; it is `None` on records that have
/// not been persisted yet. Movie IDs reference the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub nick: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    /// IDs of the users this user has befriended (directed edges).
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub rated_movies: Vec<i64>,
    #[serde(default)]
    pub favorite_movies: Vec<i64>,
    #[serde(default)]
    pub watched_movies: Vec<i64>,
}

impl User {
    pub fn new(email: impl Into<String>, nick: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            nick: nick.into(),
            ..Self::default()
        }
    }

    /// Check the caller-supplied fields before the record is persisted.
    pub fn validate(&self) -> Result<()> {
        if self.nick.trim().is_empty() {
            return Err(Error::validation("nick must not be blank"));
        }
        if !EmailAddress::is_valid(&self.email) {
            return Err(Error::validation(format!(
                "malformed email address: '{}'",
                self.email
            )));
        }
        if let Some(image) = &self.profile_image {
            validate_image_url(image)?;
        }
        Ok(())
    }
}

/// Profile images are referenced by URL; reject anything that does not parse
/// as one.
pub fn validate_image_url(url: &str) -> Result<()> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| Error::validation(format!("malformed image URL: '{url}'")))
}
