//! Session state machine.
//!
//! [`Session::handle`] is a pure transition: it consumes one [`Event`],
//! updates the state and returns the [`Effect`]s to perform. Nothing here
//! touches the store, the terminal or the clock.

use crate::domain::{Note, NoteId};
use crate::session::fuzzy::{FuzzyMatcher, SubsequenceMatcher};
use crate::store::NoteFilter;

/// A key press, independent of the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Alt(char),
    Ctrl(char),
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
}

/// Input to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(Key),
    /// Result of a [`Effect::LoadNotes`].
    NotesLoaded(Vec<Note>),
}

/// Work the session asks its runner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load notes and reply with [`Event::NotesLoaded`].
    LoadNotes(NoteFilter),
    Open(NoteId),
    /// Create a note in the current context, then open it.
    CreateNote { title: String },
    Delete(NoteId),
    Quit,
}

/// Which input has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    NewNote,
    DeleteConfirm { id: NoteId, title: String },
}

/// Where a session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartMode {
    #[default]
    Normal,
    Search,
}

/// Interactive browsing state over one filtered set of notes.
///
/// Loaded notes are kept most-recently-modified first. The displayed list is
/// either that full list or, while a search query is set, the matcher's
/// ranking of it. The cursor always satisfies
/// `cursor < max(1, displayed count)`.
#[derive(Debug)]
pub struct Session<M: FuzzyMatcher = SubsequenceMatcher> {
    mode: Mode,
    filter: NoteFilter,
    notes: Vec<Note>,
    visible: Vec<usize>,
    cursor: usize,
    query: String,
    draft_title: String,
    loaded: bool,
    matcher: M,
}

impl Session {
    pub fn new(filter: NoteFilter, start: StartMode) -> Self {
        Self::with_matcher(filter, start, SubsequenceMatcher)
    }
}

impl<M: FuzzyMatcher> Session<M> {
    pub fn with_matcher(filter: NoteFilter, start: StartMode, matcher: M) -> Self {
        let mode = match start {
            StartMode::Normal => Mode::Normal,
            StartMode::Search => Mode::Search,
        };
        Self {
            mode,
            filter,
            notes: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            query: String::new(),
            draft_title: String::new(),
            loaded: false,
            matcher,
        }
    }

    /// Effects to run before the first key: the initial load.
    pub fn start(&self) -> Vec<Effect> {
        vec![self.reload()]
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The new-note title typed so far.
    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the initial load has arrived.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Every loaded note, most recently modified first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The displayed notes, in display order.
    pub fn visible(&self) -> Vec<&Note> {
        self.visible.iter().map(|&i| &self.notes[i]).collect()
    }

    pub fn selected(&self) -> Option<&Note> {
        self.visible.get(self.cursor).map(|&i| &self.notes[i])
    }

    // ===========================================
    // Transitions
    // ===========================================

    /// Applies one event and returns the effects it produces, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::NotesLoaded(notes) => {
                self.load(notes);
                Vec::new()
            }
            Event::Key(key) => match self.mode {
                Mode::Normal => self.on_normal(key),
                Mode::Search => self.on_search(key),
                Mode::NewNote => self.on_new_note(key),
                Mode::DeleteConfirm { .. } => self.on_delete_confirm(key),
            },
        }
    }

    fn on_normal(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Char('n') => {
                self.draft_title.clear();
                self.mode = Mode::NewNote;
            }
            Key::Char('/') => self.mode = Mode::Search,
            Key::Char('d') => {
                if let Some((id, title)) = self
                    .selected()
                    .map(|n| (n.id().clone(), n.title().to_string()))
                {
                    self.mode = Mode::DeleteConfirm { id, title };
                }
            }
            Key::Char('j') | Key::Down => self.move_down(),
            Key::Char('k') | Key::Up => self.move_up(),
            Key::Char('o') | Key::Enter => return self.open_selected(),
            Key::Char('q') | Key::Ctrl('c') => return vec![Effect::Quit],
            _ => {}
        }
        Vec::new()
    }

    fn on_search(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Char(c) => {
                self.query.push(c);
                self.refilter_from_top();
            }
            Key::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter_from_top();
                }
            }
            Key::Esc => self.leave_search(),
            Key::Alt('j') | Key::Down => self.move_down(),
            Key::Alt('k') | Key::Up => self.move_up(),
            Key::Alt('o') | Key::Enter => return self.open_selected(),
            Key::Ctrl('c') => return vec![Effect::Quit],
            _ => {}
        }
        Vec::new()
    }

    fn on_new_note(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Char(c) => self.draft_title.push(c),
            Key::Backspace => {
                self.draft_title.pop();
            }
            Key::Enter => {
                let title = self.draft_title.trim().to_string();
                self.draft_title.clear();
                self.mode = Mode::Normal;
                if !title.is_empty() {
                    return vec![Effect::CreateNote { title }, self.reload()];
                }
            }
            Key::Esc => {
                self.draft_title.clear();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        Vec::new()
    }

    fn on_delete_confirm(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Char('y') | Key::Char('Y') => {
                if let Mode::DeleteConfirm { id, .. } =
                    std::mem::replace(&mut self.mode, Mode::Normal)
                {
                    return vec![Effect::Delete(id), self.reload()];
                }
            }
            Key::Char('n') | Key::Char('N') | Key::Esc => self.mode = Mode::Normal,
            _ => {}
        }
        Vec::new()
    }

    // ===========================================
    // Helpers
    // ===========================================

    fn reload(&self) -> Effect {
        Effect::LoadNotes(self.filter.clone())
    }

    fn open_selected(&self) -> Vec<Effect> {
        self.selected()
            .map(|n| vec![Effect::Open(n.id().clone())])
            .unwrap_or_default()
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }

    fn load(&mut self, mut notes: Vec<Note>) {
        let selected = self.selected().map(|n| n.id().clone());
        notes.sort_by(|a, b| b.modified().cmp(&a.modified()));
        self.notes = notes;
        self.loaded = true;
        self.refilter();
        self.reselect(selected.as_ref());
    }

    fn refilter(&mut self) {
        let titles: Vec<&str> = self.notes.iter().map(Note::title).collect();
        self.visible = self.matcher.rank(&self.query, &titles);
    }

    fn refilter_from_top(&mut self) {
        self.refilter();
        self.cursor = 0;
    }

    /// Leaving search clears the query and shows every note again, keeping
    /// the selected note under the cursor when possible.
    fn leave_search(&mut self) {
        let selected = self.selected().map(|n| n.id().clone());
        self.query.clear();
        self.refilter();
        self.reselect(selected.as_ref());
        self.mode = Mode::Normal;
    }

    fn reselect(&mut self, id: Option<&NoteId>) {
        let position =
            id.and_then(|id| self.visible.iter().position(|&i| self.notes[i].id() == id));
        match position {
            Some(pos) => self.cursor = pos,
            None => self.clamp_cursor(),
        }
    }
}
