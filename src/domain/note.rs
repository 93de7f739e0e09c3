//! The note entity plus its creation input and partial-update patch.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error returned when a note would be built with an empty title.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid note: title cannot be empty")]
pub struct EmptyTitleError;

/// A captured note and its context labels.
///
/// Empty `project`, `branch` and `ticket` strings mean "unscoped". Tags keep
/// insertion order and may repeat.
#[derive(Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    path: PathBuf,
    project: String,
    branch: String,
    ticket: String,
    tags: Vec<String>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Note {
    /// Starts building a note from its identity fields.
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder {
            id,
            title: title.into(),
            created,
            modified,
            path: PathBuf::new(),
            project: String::new(),
            branch: String::new(),
            ticket: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Applies every present field of `patch` and stamps `modified`.
    ///
    /// Callers validate the patch first; `id` and `created` are never touched.
    pub(crate) fn apply(&mut self, patch: NotePatch, modified: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(path) = patch.path {
            self.path = path;
        }
        if let Some(project) = patch.project {
            self.project = project;
        }
        if let Some(branch) = patch.branch {
            self.branch = branch;
        }
        if let Some(ticket) = patch.ticket {
            self.ticket = ticket;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.modified = modified;
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("path", &self.path)
            .field("project", &self.project)
            .field("branch", &self.branch)
            .field("ticket", &self.ticket)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Builder for reconstructing a [`Note`], used by the store and repositories.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    path: PathBuf,
    project: String,
    branch: String,
    ticket: String,
    tags: Vec<String>,
}

impl NoteBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = ticket.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builds the note. The title is kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTitleError`] if the title is empty or whitespace-only.
    pub fn build(self) -> Result<Note, EmptyTitleError> {
        if self.title.trim().is_empty() {
            return Err(EmptyTitleError);
        }

        Ok(Note {
            id: self.id,
            title: self.title,
            path: self.path,
            project: self.project,
            branch: self.branch,
            ticket: self.ticket,
            tags: self.tags,
            created: self.created,
            modified: self.modified,
        })
    }
}

/// Input for creating a note.
///
/// There is no id or timestamp here: the store assigns those. An empty
/// `path` asks the store to derive one from the context labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub path: Option<PathBuf>,
    pub project: String,
    pub branch: String,
    pub ticket: String,
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = ticket.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A partial update: each `Some` field replaces the stored value, each `None`
/// leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub path: Option<PathBuf>,
    pub project: Option<String>,
    pub branch: Option<String>,
    pub ticket: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = Some(ticket.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.path.is_none()
            && self.project.is_none()
            && self.branch.is_none()
            && self.ticket.is_none()
            && self.tags.is_none()
    }
}
