//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod critiques;
mod movie_search;
mod users;

pub use critiques::CritiqueService;
pub use movie_search::MovieSearchService;
pub use users::UserService;
