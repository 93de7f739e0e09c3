//! In-memory repository for tests and throwaway sessions.

use crate::domain::{Note, NoteId};
use crate::store::{NoteFilter, NoteRepository, RepoResult};
use std::collections::HashMap;
use std::path::Path;

/// Keeps records in a hash map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    notes: HashMap<NoteId, Note>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl NoteRepository for MemoryRepository {
    fn insert(&mut self, note: &Note) -> RepoResult<()> {
        self.notes.insert(note.id().clone(), note.clone());
        Ok(())
    }

    fn replace(&mut self, note: &Note) -> RepoResult<bool> {
        match self.notes.get_mut(note.id()) {
            Some(slot) => {
                *slot = note.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, id: &NoteId) -> RepoResult<bool> {
        Ok(self.notes.remove(id).is_some())
    }

    fn get(&self, id: &NoteId) -> RepoResult<Option<Note>> {
        Ok(self.notes.get(id).cloned())
    }

    fn find_by_path(&self, path: &Path) -> RepoResult<Option<Note>> {
        Ok(self.notes.values().find(|n| n.path() == path).cloned())
    }

    fn list(&self, filter: &NoteFilter) -> RepoResult<Vec<Note>> {
        Ok(self
            .notes
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect())
    }
}
