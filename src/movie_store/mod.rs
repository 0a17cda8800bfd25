//! Record store for the movie collection.
//!
//! Two interchangeable backends implement [`MovieStore`]: a JSON snapshot file
//! and a single SQLite table. Callers pick one at startup through
//! [`StoreLocation`] and only ever talk to the trait afterwards.

mod error;
mod json_store;
mod schema;
mod sqlite_store;

pub use error::{StoreError, StoreResult};
pub use json_store::JsonMovieStore;
pub use schema::MOVIES_TABLE;
pub use sqlite_store::SqliteMovieStore;

use crate::movie::MovieCollection;
use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::info;

/// Uniform CRUD contract over the movie collection, keyed by exact title.
///
/// Nothing is cached between calls: every method goes back to the file or the
/// database. The collection is expected to stay small, so `list` always reads
/// everything and the JSON backend rewrites the whole snapshot on each change.
pub trait MovieStore: Send + Sync {
    /// Returns the full current collection.
    fn list(&self) -> StoreResult<MovieCollection>;

    /// Inserts a new movie.
    /// The JSON backend overwrites an existing entry, the SQLite backend
    /// fails with [`StoreError::AlreadyExists`].
    fn add(
        &self,
        title: &str,
        year: i32,
        rating: f64,
        poster_url: Option<&str>,
    ) -> StoreResult<()>;

    /// Removes the movie with exactly this title.
    /// Missing titles are a no-op for JSON and [`StoreError::NotFound`] for SQLite.
    fn delete(&self, title: &str) -> StoreResult<()>;

    /// Replaces the rating of a movie, leaving every other field untouched.
    /// Same presence semantics as [`MovieStore::delete`].
    fn update_rating(&self, title: &str, rating: f64) -> StoreResult<()>;

    /// Human readable description of where the collection lives.
    fn location(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

/// A resolved backend together with the resource it persists to.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreLocation {
    Json(PathBuf),
    Sqlite(PathBuf),
}

impl StoreLocation {
    pub fn backend(&self) -> StorageBackend {
        match self {
            StoreLocation::Json(_) => StorageBackend::Json,
            StoreLocation::Sqlite(_) => StorageBackend::Sqlite,
        }
    }
}

/// Opens the configured backend. The SQLite table is created if missing.
pub fn open(location: &StoreLocation) -> Result<Box<dyn MovieStore>> {
    let store: Box<dyn MovieStore> = match location {
        StoreLocation::Json(path) => Box::new(JsonMovieStore::new(path)),
        StoreLocation::Sqlite(path) => Box::new(SqliteMovieStore::new(path)?),
    };
    info!("Opened {:?} movie store at {}", location.backend(), store.location());
    Ok(store)
}
