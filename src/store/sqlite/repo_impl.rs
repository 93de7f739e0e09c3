//! NoteRepository trait implementation for SqliteRepository.

use super::SqliteRepository;
use crate::domain::{Note, NoteId};
use crate::store::{NoteFilter, NoteRepository, PersistenceError, RepoResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use std::path::{Path, PathBuf};

const SELECT_COLUMNS: &str =
    "SELECT id, title, path, project, branch, ticket, tags, created_at, modified_at FROM notes";

/// A row as read from SQLite, before validation.
struct RawNote {
    id: String,
    title: String,
    path: String,
    project: Option<String>,
    branch: Option<String>,
    ticket: Option<String>,
    tags: Option<String>,
    created: String,
    modified: String,
}

impl RawNote {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            path: row.get(2)?,
            project: row.get(3)?,
            branch: row.get(4)?,
            ticket: row.get(5)?,
            tags: row.get(6)?,
            created: row.get(7)?,
            modified: row.get(8)?,
        })
    }

    fn into_note(self) -> RepoResult<Note> {
        let invalid = |reason: String| PersistenceError::InvalidRecord {
            id: self.id.clone(),
            reason,
        };

        let id: NoteId = self
            .id
            .parse()
            .map_err(|e| invalid(format!("bad id: {e}")))?;
        let created = parse_timestamp(&self.created)
            .map_err(|e| invalid(format!("bad created_at: {e}")))?;
        let modified = parse_timestamp(&self.modified)
            .map_err(|e| invalid(format!("bad modified_at: {e}")))?;
        let tags: Vec<String> = match self.tags.as_deref() {
            None | Some("") => Vec::new(),
            Some(json) => serde_json::from_str(json)?,
        };

        Note::builder(id, self.title.as_str(), created, modified)
            .path(PathBuf::from(&self.path))
            .project(self.project.clone().unwrap_or_default())
            .branch(self.branch.clone().unwrap_or_default())
            .ticket(self.ticket.clone().unwrap_or_default())
            .tags(tags)
            .build()
            .map_err(|e| invalid(e.to_string()))
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// WHERE clause and bound values for a filter. Unset columns read as ''.
fn filter_clause(filter: &NoteFilter) -> (&'static str, Vec<&str>) {
    match filter {
        NoteFilter::All => ("", Vec::new()),
        NoteFilter::Project(project) => {
            (" WHERE COALESCE(project, '') = ?1", vec![project.as_str()])
        }
        NoteFilter::Branch(branch) => (" WHERE COALESCE(branch, '') = ?1", vec![branch.as_str()]),
        NoteFilter::ProjectBranch { project, branch } => (
            " WHERE COALESCE(project, '') = ?1 AND COALESCE(branch, '') = ?2",
            vec![project.as_str(), branch.as_str()],
        ),
        NoteFilter::ProjectMisc(project) => (
            " WHERE COALESCE(project, '') = ?1 AND COALESCE(branch, '') = ''",
            vec![project.as_str()],
        ),
        NoteFilter::Ticket(ticket) => (" WHERE COALESCE(ticket, '') = ?1", vec![ticket.as_str()]),
    }
}

impl SqliteRepository {
    fn query_one(&self, sql: &str, value: &str) -> RepoResult<Option<Note>> {
        let raw = self
            .conn
            .query_row(sql, [value], RawNote::from_row)
            .optional()?;
        raw.map(RawNote::into_note).transpose()
    }
}

impl NoteRepository for SqliteRepository {
    fn insert(&mut self, note: &Note) -> RepoResult<()> {
        let tags = serde_json::to_string(note.tags())?;
        self.conn.execute(
            "INSERT INTO notes (id, title, path, project, branch, ticket, tags, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                note.id().to_string(),
                note.title(),
                note.path().to_string_lossy().into_owned(),
                note.project(),
                note.branch(),
                note.ticket(),
                tags,
                format_timestamp(note.created()),
                format_timestamp(note.modified()),
            ],
        )?;
        Ok(())
    }

    fn replace(&mut self, note: &Note) -> RepoResult<bool> {
        let tags = serde_json::to_string(note.tags())?;
        // created_at never changes after insert
        let changed = self.conn.execute(
            "UPDATE notes
             SET title = ?2, path = ?3, project = ?4, branch = ?5, ticket = ?6, tags = ?7, modified_at = ?8
             WHERE id = ?1",
            params![
                note.id().to_string(),
                note.title(),
                note.path().to_string_lossy().into_owned(),
                note.project(),
                note.branch(),
                note.ticket(),
                tags,
                format_timestamp(note.modified()),
            ],
        )?;
        Ok(changed > 0)
    }

    fn remove(&mut self, id: &NoteId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn get(&self, id: &NoteId) -> RepoResult<Option<Note>> {
        self.query_one(&format!("{SELECT_COLUMNS} WHERE id = ?1"), &id.to_string())
    }

    fn find_by_path(&self, path: &Path) -> RepoResult<Option<Note>> {
        self.query_one(
            &format!("{SELECT_COLUMNS} WHERE path = ?1 LIMIT 1"),
            &path.to_string_lossy(),
        )
    }

    fn list(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>> {
        let (clause, values) = filter_clause(filter);
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS}{clause}"))?;

        let raws = stmt
            .query_map(params_from_iter(values), RawNote::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raws.into_iter().map(RawNote::into_note).collect()
    }
}
