//! SQLite schema for note records.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the note tables and indexes.
///
/// Idempotent: every statement uses `IF NOT EXISTS` / `OR IGNORE`.
///
/// # Tables Created
/// - `notes` - one row per note; `tags` holds a JSON array
/// - `schema_version` - schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            path TEXT NOT NULL,
            project TEXT NOT NULL DEFAULT '',
            branch TEXT NOT NULL DEFAULT '',
            ticket TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            modified_at TEXT NOT NULL
        );",
    )?;

    // Lookups used by the context-scoped queries
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_project ON notes(project);
         CREATE INDEX IF NOT EXISTS idx_notes_branch ON notes(branch);
         CREATE INDEX IF NOT EXISTS idx_notes_ticket ON notes(ticket);
         CREATE INDEX IF NOT EXISTS idx_notes_path ON notes(path);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}
