//! Crossterm frontend for the interactive session.

use crate::session::fuzzy::FuzzyMatcher;
use crate::session::runner::Frontend;
use crate::session::state::{Key, Mode, Session};
use crate::store::NoteFilter;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

/// Full-screen frontend on the process's terminal.
///
/// Raw mode and the alternate screen are entered on construction and
/// restored on drop.
pub struct TerminalFrontend {
    out: Stdout,
}

impl TerminalFrontend {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Frontend for TerminalFrontend {
    fn draw<M: FuzzyMatcher>(&mut self, session: &Session<M>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let width = usize::from(width);
        // Header, blank line, blank line, footer
        let rows = usize::from(height).saturating_sub(4).max(1);

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        queue!(
            self.out,
            Print(fit(&format!("jot  {}", describe_filter(session)), width))
        )?;

        let visible = session.visible();
        let offset = session.cursor().saturating_sub(rows - 1);
        if !session.is_loaded() {
            queue!(self.out, MoveTo(0, 2), Print("loading..."))?;
        } else if visible.is_empty() {
            queue!(self.out, MoveTo(0, 2), Print("no notes"))?;
        }

        for (row, (index, note)) in visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows)
            .enumerate()
        {
            let selected = index == session.cursor();
            let line = format!("{} {}", if selected { ">" } else { " " }, note.title());
            queue!(self.out, MoveTo(0, (row + 2) as u16))?;
            if selected {
                queue!(
                    self.out,
                    SetAttribute(Attribute::Reverse),
                    Print(fit(&line, width)),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue!(self.out, Print(fit(&line, width)))?;
            }
        }

        queue!(
            self.out,
            MoveTo(0, height.saturating_sub(1)),
            Print(fit(&footer(session), width))
        )?;
        self.out.flush()
    }

    fn next_key(&mut self) -> io::Result<Option<Key>> {
        loop {
            if let TermEvent::Key(key) = event::read()?
                && let Some(key) = map_key(key)
            {
                return Ok(Some(key));
            }
        }
    }
}

/// Translates a crossterm key press. Releases and unbound keys map to `None`.
pub(crate) fn map_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Ctrl(c)),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::ALT) => Some(Key::Alt(c)),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        _ => None,
    }
}

fn describe_filter<M: FuzzyMatcher>(session: &Session<M>) -> String {
    match session.filter() {
        NoteFilter::All => "all notes".to_string(),
        NoteFilter::Project(p) => format!("project {p}"),
        NoteFilter::Branch(b) => format!("branch {b}"),
        NoteFilter::ProjectBranch { project, branch } => format!("{project} @ {branch}"),
        NoteFilter::ProjectMisc(p) => format!("project {p} (misc)"),
        NoteFilter::Ticket(t) => format!("ticket {t}"),
    }
}

fn footer<M: FuzzyMatcher>(session: &Session<M>) -> String {
    match session.mode() {
        Mode::Normal => "n new  / search  d delete  enter open  q quit".to_string(),
        Mode::Search => format!("search: {}_", session.query()),
        Mode::NewNote => format!("new note: {}_", session.draft_title()),
        Mode::DeleteConfirm { title, .. } => format!("delete '{title}'? (y/n)"),
    }
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
