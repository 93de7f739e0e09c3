//! SQLite-backed note records.

mod connection;
mod repo_impl;
mod schema;


use rusqlite::Connection;

pub use schema::{SCHEMA_VERSION, create_schema};

/// Durable note records in a single SQLite table.
pub struct SqliteRepository {
    pub(crate) conn: Connection,
}
