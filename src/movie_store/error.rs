use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a [`super::MovieStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie not found: {title}")]
    NotFound { title: String },

    #[error("movie already exists: {title}")]
    AlreadyExists { title: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode movie collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Anything that went wrong while talking to the backing resource,
    /// including constraint violations.
    pub fn is_persistence_fault(&self) -> bool {
        !self.is_not_found()
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
