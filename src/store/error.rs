//! Error types for note store operations.

use crate::infra::FsError;
use crate::store::LaunchError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the durable record layer.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The SQLite engine reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Tags could not be encoded to or decoded from JSON.
    #[error("tag encoding error: {0}")]
    Tags(#[from] serde_json::Error),

    /// A stored row could not be turned back into a note.
    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// The database location could not be prepared.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Broad category of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Persistence,
    Filesystem,
    ExternalProcess,
}

/// Errors returned by [`NoteStore`](super::NoteStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No note has the requested id.
    #[error("note not found: {id}")]
    NotFound { id: String },

    /// The input to a mutating call was malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Reading or writing the durable record failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Creating, writing or removing a note file or directory failed.
    #[error("filesystem error: {0}")]
    Filesystem(#[from] FsError),

    /// The opener or editor could not be launched.
    #[error(transparent)]
    ExternalProcess(#[from] LaunchError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::Persistence(_) => ErrorKind::Persistence,
            StoreError::Filesystem(_) => ErrorKind::Filesystem,
            StoreError::ExternalProcess(_) => ErrorKind::ExternalProcess,
        }
    }

    pub(crate) fn not_found(id: impl ToString) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Persistence(PersistenceError::Database(e))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, PersistenceError>;
