//! NoteRepository trait and note filters.

use crate::domain::{Note, NoteId};
use crate::store::RepoResult;
use std::path::Path;

/// A selection of notes by their context labels.
///
/// String comparisons are exact; the empty string selects notes whose field
/// is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteFilter {
    /// Every note.
    #[default]
    All,
    /// Notes in one project, any branch.
    Project(String),
    /// Notes on one branch, any project.
    Branch(String),
    /// Notes in one project on one branch.
    ProjectBranch { project: String, branch: String },
    /// Notes in one project with no branch: the project's misc bucket.
    ProjectMisc(String),
    /// Notes for one ticket.
    Ticket(String),
}

impl NoteFilter {
    /// Returns whether `note` belongs to this selection.
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Project(project) => note.project() == project,
            NoteFilter::Branch(branch) => note.branch() == branch,
            NoteFilter::ProjectBranch { project, branch } => {
                note.project() == project && note.branch() == branch
            }
            NoteFilter::ProjectMisc(project) => {
                note.project() == project && note.branch().is_empty()
            }
            NoteFilter::Ticket(ticket) => note.ticket() == ticket,
        }
    }
}

/// Durable record storage for notes.
///
/// Implementations only store and query rows. Identity, timestamps, paths and
/// backing files are the [`NoteStore`](super::NoteStore)'s business.
pub trait NoteRepository {
    /// Stores a new record.
    fn insert(&mut self, note: &Note) -> RepoResult<()>;

    /// Overwrites the record with the same id. Returns false if none existed.
    fn replace(&mut self, note: &Note) -> RepoResult<bool>;

    /// Deletes a record. Returns false if none existed.
    fn remove(&mut self, id: &NoteId) -> RepoResult<bool>;

    /// Loads one record.
    fn get(&self, id: &NoteId) -> RepoResult<Option<Note>>;

    /// Loads the record whose backing file is `path`, if any.
    fn find_by_path(&self, path: &Path) -> RepoResult<Option<Note>>;

    /// Loads every record selected by `filter`, in no particular order.
    fn list(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>>;
}
