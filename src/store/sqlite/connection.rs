//! Connection management for SqliteRepository.

use super::SqliteRepository;
use super::schema::create_schema;
use crate::store::{PersistenceError, RepoResult};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteRepository {
    /// Opens an in-memory database with the notes schema.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens or creates a database at `path`.
    ///
    /// Creates parent directories if they don't exist and initializes the
    /// schema on first use.
    pub fn open(path: &Path) -> RepoResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        log::debug!("opened note database at {}", path.display());
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
