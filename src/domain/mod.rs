//! Core types: Note, NoteId, creation input and update patch

mod note;
mod note_id;

pub use note::{EmptyTitleError, NewNote, Note, NoteBuilder, NotePatch};
pub use note_id::{NoteId, ParseNoteIdError};
