//! HTTP handlers, one module per resource

pub mod critiques;
pub mod movies;
pub mod users;
