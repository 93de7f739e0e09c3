//! Note management handlers (tag, rm).

use anyhow::{Context, Result};

use super::resolve::require_note;
use crate::cli::{RmArgs, TagArgs};
use crate::domain::{Note, NotePatch};
use crate::store::NoteStore;

pub fn handle_tag(args: &TagArgs, store: &mut NoteStore) -> Result<()> {
    let note = add_tags(store, &args.note, &args.tags)?;
    println!("Tagged {}: {}", note, note.tags().join(", "));
    Ok(())
}

pub fn handle_rm(args: &RmArgs, store: &mut NoteStore) -> Result<()> {
    let note = remove_note(store, &args.note)?;
    println!("Deleted {}", note);
    Ok(())
}

/// Appends `tags` to the note's tags, in order, and returns the updated note.
pub(crate) fn add_tags(store: &mut NoteStore, identifier: &str, tags: &[String]) -> Result<Note> {
    let note = require_note(store, identifier)?;

    let mut all = note.tags().to_vec();
    all.extend(
        tags.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );

    store
        .update(note.id(), NotePatch::default().tags(all))
        .with_context(|| format!("failed to tag {}", note))
}

pub(crate) fn remove_note(store: &mut NoteStore, identifier: &str) -> Result<Note> {
    let note = require_note(store, identifier)?;
    store
        .delete(note.id())
        .with_context(|| format!("failed to delete {}", note))?;
    Ok(note)
}
