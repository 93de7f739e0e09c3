//! Effect execution and the session loop.

use crate::domain::NewNote;
use crate::infra::ContextResolver;
use crate::session::fuzzy::FuzzyMatcher;
use crate::session::state::{Effect, Event, Key, Session};
use crate::store::NoteStore;
use std::collections::VecDeque;
use std::io;

/// Performs session effects against a store.
///
/// Store failures are logged and swallowed; the session keeps running.
pub struct EffectRunner<'a> {
    store: &'a mut NoteStore,
    context: &'a dyn ContextResolver,
}

impl<'a> EffectRunner<'a> {
    pub fn new(store: &'a mut NoteStore, context: &'a dyn ContextResolver) -> Self {
        Self { store, context }
    }

    /// Runs one effect and returns the event it produced, if any.
    ///
    /// `Quit` is the driver's business and does nothing here.
    pub fn run(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::LoadNotes(filter) => match self.store.find(&filter) {
                Ok(notes) => {
                    log::debug!("loaded {} notes for {:?}", notes.len(), filter);
                    Some(Event::NotesLoaded(notes))
                }
                Err(e) => {
                    log::error!("failed to load notes: {e}");
                    None
                }
            },
            Effect::Open(id) => {
                if let Err(e) = self.store.open(&id) {
                    log::error!("failed to open {id}: {e}");
                }
                None
            }
            Effect::CreateNote { title } => {
                self.create_and_open(title);
                None
            }
            Effect::Delete(id) => {
                if let Err(e) = self.store.delete(&id) {
                    log::error!("failed to delete {id}: {e}");
                }
                None
            }
            Effect::Quit => None,
        }
    }

    fn create_and_open(&mut self, title: String) {
        let draft = NewNote::new(title)
            .project(self.context.current_project())
            .branch(self.context.current_branch());

        let note = match self.store.create(draft) {
            Ok(note) => note,
            Err(e) => {
                log::error!("failed to create note: {e}");
                return;
            }
        };
        if let Err(e) = self.store.open(note.id()) {
            log::warn!("created {} but could not open it: {e}", note.id());
        }
    }
}

/// Something that can show a session and read keys.
pub trait Frontend {
    /// Renders the current state.
    fn draw<M: FuzzyMatcher>(&mut self, session: &Session<M>) -> io::Result<()>;

    /// Blocks for the next key. `None` means input is closed.
    fn next_key(&mut self) -> io::Result<Option<Key>>;
}

/// Runs a session until it quits or input closes.
///
/// Each pass draws, then either runs one queued effect (feeding any event it
/// produces back into the session) or waits for a key. The initial load is
/// queued up front, so the first frame shows an empty list.
pub fn drive<M, F>(
    session: &mut Session<M>,
    runner: &mut EffectRunner<'_>,
    frontend: &mut F,
) -> io::Result<()>
where
    M: FuzzyMatcher,
    F: Frontend,
{
    let mut pending: VecDeque<Effect> = session.start().into();

    loop {
        frontend.draw(session)?;

        if let Some(effect) = pending.pop_front() {
            if effect == Effect::Quit {
                log::debug!("session quit");
                return Ok(());
            }
            if let Some(event) = runner.run(effect) {
                pending.extend(session.handle(event));
            }
            continue;
        }

        let Some(key) = frontend.next_key()? else {
            log::debug!("input closed; ending session");
            return Ok(());
        };
        pending.extend(session.handle(Event::Key(key)));
    }
}
