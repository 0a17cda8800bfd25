//! Movie Catalog Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod cli_style;
pub mod config;
pub mod menu;
pub mod movie;
pub mod movie_store;
pub mod omdb;
pub mod query;
pub mod sqlite_persistence;
pub mod website;

// Re-export commonly used types for convenience
pub use movie::{MovieCollection, MovieInfo};
pub use movie_store::{JsonMovieStore, MovieStore, SqliteMovieStore, StoreError, StoreResult};
