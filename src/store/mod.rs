//! Note store: identity, backing files and persisted records.

mod error;
mod layout;
mod memory;
mod opener;
mod repository;
mod sqlite;


pub use error::{ErrorKind, PersistenceError, RepoResult, StoreError, StoreResult};
pub use layout::{DEFAULT_EXTENSION, NoteLayout, render_template};
pub use memory::MemoryRepository;
pub use opener::{EditorOpener, LaunchError, Opener, RecordingOpener, SystemOpener};
pub use repository::{NoteFilter, NoteRepository};
pub use sqlite::{SCHEMA_VERSION, SqliteRepository, create_schema};

use crate::domain::{NewNote, Note, NoteId, NotePatch};
use crate::infra::{ensure_parent, remove_if_exists, write_atomic};
use chrono::{DateTime, Duration, Utc};

/// CRUD and query surface over notes.
///
/// The store assigns ids and timestamps, derives and materializes backing
/// files, and keeps records in a [`NoteRepository`]. A record and its file are
/// created together and removed together; a crash in between can leave an
/// orphan on either side, which is not repaired.
pub struct NoteStore {
    repo: Box<dyn NoteRepository>,
    layout: NoteLayout,
    opener: Box<dyn Opener>,
}

impl NoteStore {
    pub fn new(
        repo: Box<dyn NoteRepository>,
        layout: NoteLayout,
        opener: Box<dyn Opener>,
    ) -> Self {
        Self {
            repo,
            layout,
            opener,
        }
    }

    /// A store whose records live only in memory.
    pub fn in_memory(layout: NoteLayout, opener: Box<dyn Opener>) -> Self {
        Self::new(Box::new(MemoryRepository::new()), layout, opener)
    }

    pub fn layout(&self) -> &NoteLayout {
        &self.layout
    }

    // ===========================================
    // Mutations
    // ===========================================

    /// Creates a note and its backing file.
    ///
    /// Without an explicit path the file goes to
    /// `root/project/[ticket/]branch/title.ext`. The file is written before
    /// the record; if the record write fails the file stays behind.
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is blank or another note already owns the path
    /// - `Filesystem` if the directory or file cannot be written
    /// - `Persistence` if the record cannot be stored
    pub fn create(&mut self, draft: NewNote) -> StoreResult<Note> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::Validation("title cannot be empty".into()));
        }

        let id = NoteId::generate();
        let now = Utc::now();
        let path = match draft.path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            Some(explicit) => self.layout.resolve(explicit),
            None => self
                .layout
                .derive_path(&draft.project, &draft.ticket, &draft.branch, &draft.title),
        };

        if let Some(owner) = self.repo.find_by_path(&path)? {
            return Err(StoreError::Validation(format!(
                "note {} already uses {}",
                owner,
                path.display()
            )));
        }

        let note = Note::builder(id, draft.title, now, now)
            .path(&path)
            .project(draft.project)
            .branch(draft.branch)
            .ticket(draft.ticket)
            .tags(draft.tags)
            .build()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        ensure_parent(&path)?;
        let content = render_template(
            note.title(),
            note.created(),
            note.project(),
            note.branch(),
            note.ticket(),
        );
        write_atomic(&path, &content)?;

        if let Err(e) = self.repo.insert(&note) {
            log::warn!(
                "record for {} not stored; leaving file {}",
                note.id(),
                path.display()
            );
            return Err(e.into());
        }

        log::debug!("created note {} at {}", note.id(), path.display());
        Ok(note)
    }

    /// Deletes a note's file and record.
    ///
    /// An already-missing file is fine. The record is kept if the file exists
    /// but cannot be removed.
    pub fn delete(&mut self, id: &NoteId) -> StoreResult<()> {
        let note = self.get_by_id(id)?;

        if !remove_if_exists(note.path())? {
            log::debug!("file for {} was already gone: {}", id, note.path().display());
        }

        if !self.repo.remove(id)? {
            return Err(StoreError::not_found(id));
        }

        log::debug!("deleted note {}", id);
        Ok(())
    }

    /// Applies a partial update and bumps `modified` once.
    ///
    /// Fields absent from `patch` are untouched. `id` and `created` never
    /// change. A relative replacement path is anchored at the notes root.
    pub fn update(&mut self, id: &NoteId, mut patch: NotePatch) -> StoreResult<Note> {
        let mut note = self.get_by_id(id)?;

        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            return Err(StoreError::Validation("title cannot be empty".into()));
        }
        if let Some(path) = patch.path.take() {
            if path.as_os_str().is_empty() {
                return Err(StoreError::Validation("path cannot be empty".into()));
            }
            patch.path = Some(self.layout.resolve(&path));
        }

        note.apply(patch, next_modified(note.modified(), Utc::now()));

        if !self.repo.replace(&note)? {
            return Err(StoreError::not_found(id));
        }

        log::debug!("updated note {}", id);
        Ok(note)
    }

    // ===========================================
    // Queries
    // ===========================================

    pub fn get_by_id(&self, id: &NoteId) -> StoreResult<Note> {
        self.repo
            .get(id)?
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Every note, in no particular order.
    pub fn get_all(&self) -> StoreResult<Vec<Note>> {
        self.find(&NoteFilter::All)
    }

    pub fn get_in_project(&self, project: &str) -> StoreResult<Vec<Note>> {
        self.find(&NoteFilter::Project(project.to_string()))
    }

    pub fn get_by_branch(&self, branch: &str) -> StoreResult<Vec<Note>> {
        self.find(&NoteFilter::Branch(branch.to_string()))
    }

    pub fn get_by_ticket(&self, ticket: &str) -> StoreResult<Vec<Note>> {
        self.find(&NoteFilter::Ticket(ticket.to_string()))
    }

    /// Notes in `project` that have no branch.
    pub fn get_project_misc(&self, project: &str) -> StoreResult<Vec<Note>> {
        self.find(&NoteFilter::ProjectMisc(project.to_string()))
    }

    pub fn find(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        Ok(self.repo.list(filter)?)
    }

    // ===========================================
    // External open
    // ===========================================

    /// Launches the note's file in the configured opener and returns at once.
    pub fn open(&self, id: &NoteId) -> StoreResult<()> {
        let note = self.get_by_id(id)?;
        self.opener.open(note.path())?;
        log::debug!("opened {}", note.path().display());
        Ok(())
    }

    /// Like [`NoteStore::open`], but a foreground editor gets the terminal
    /// and this returns once it exits.
    pub fn open_attached(&self, id: &NoteId) -> StoreResult<()> {
        let note = self.get_by_id(id)?;
        self.opener.open_attached(note.path())?;
        log::debug!("opened {} attached", note.path().display());
        Ok(())
    }
}

/// The next `modified` stamp: the current time, or one microsecond past the
/// previous stamp if the clock has not moved past it.
fn next_modified(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
