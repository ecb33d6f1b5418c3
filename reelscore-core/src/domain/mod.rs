//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod critique;
pub mod movie;
pub mod result;
mod user;

pub use critique::{Critique, MovieAverage, MAX_RATING, MIN_RATING};
pub use movie::{CatalogMovie, MovieSummary};
pub use user::{validate_image_url, User};
