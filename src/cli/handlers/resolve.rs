//! Note resolution utilities.

use anyhow::{Context, Result, bail};

use crate::domain::{Note, NoteId};
use crate::store::NoteStore;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {}  {}", note.id(), note.title());
        let context = [note.project(), note.ticket(), note.branch()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if !context.is_empty() {
            eprintln!("      {}", context.join(" / "));
        }
    }
    eprintln!();
    eprintln!("Use the note ID to specify which note you mean.");
}

/// Resolves a note identifier among all notes.
///
/// Resolution order:
/// 1. Exact ID
/// 2. Exact title
pub fn resolve_note(store: &NoteStore, identifier: &str) -> Result<ResolveResult> {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>()
        && let Ok(note) = store.get_by_id(&id)
    {
        return Ok(ResolveResult::Unique(note));
    }

    let mut matches: Vec<Note> = store
        .get_all()
        .context("failed to list notes")?
        .into_iter()
        .filter(|n| n.title() == identifier)
        .collect();

    Ok(match matches.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(matches.remove(0)),
        _ => {
            matches.sort_by_key(|n| std::cmp::Reverse(n.modified()));
            ResolveResult::Ambiguous(matches)
        }
    })
}

/// Resolves an identifier that must name exactly one note.
pub(crate) fn require_note(store: &NoteStore, identifier: &str) -> Result<Note> {
    match resolve_note(store, identifier)? {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier: {}", identifier);
        }
        ResolveResult::NotFound => bail!("note not found: {}", identifier),
    }
}
