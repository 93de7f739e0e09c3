//! Find-or-create-then-open handlers (open, branch, proj).

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::Delivery;
use super::session::handle_session;
use crate::cli::{BranchArgs, OpenArgs, ProjArgs};
use crate::domain::{NewNote, Note, NoteId};
use crate::infra::ContextResolver;
use crate::store::{NoteFilter, NoteStore};

/// What a context-scoped lookup settled on.
#[derive(Debug)]
pub enum Target {
    /// A single note to open.
    Note(Note),
    /// Several candidates: browse them in a session with this filter.
    Browse(NoteFilter),
}

pub fn handle_open(
    args: &OpenArgs,
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    delivery: Delivery,
) -> Result<()> {
    let note = find_or_create(store, context, &args.title, args.ticket.as_deref())?;
    deliver(store, &note, delivery.print_path)
}

pub fn handle_branch(
    args: &BranchArgs,
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    delivery: Delivery,
) -> Result<()> {
    let target = branch_target(store, context, args.title.as_deref())?;
    dispatch(target, store, context, delivery)
}

pub fn handle_proj(
    args: &ProjArgs,
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    delivery: Delivery,
) -> Result<()> {
    let target = project_target(store, context, args.title.as_deref())?;
    dispatch(target, store, context, delivery)
}

fn dispatch(
    target: Target,
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    delivery: Delivery,
) -> Result<()> {
    match target {
        Target::Note(note) => deliver(store, &note, delivery.print_path),
        Target::Browse(filter) => handle_session(store, context, filter, delivery.start),
    }
}

/// Opens the note, or prints its path for an editor integration.
fn deliver(store: &NoteStore, note: &Note, print_path: bool) -> Result<()> {
    if print_path {
        // No trailing newline: editor integrations read stdout as the path
        let mut stdout = io::stdout();
        write!(stdout, "{}", note.path().display())
            .and_then(|()| stdout.flush())
            .context("failed to print note path")?;
        return Ok(());
    }
    store
        .open_attached(note.id())
        .with_context(|| format!("failed to open {}", note.path().display()))
}

// ===========================================
// Lookups
// ===========================================

/// Finds a note by exact id anywhere, or by title in the current project
/// and branch. Creates it in that context when absent.
pub(crate) fn find_or_create(
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    title: &str,
    ticket: Option<&str>,
) -> Result<Note> {
    let title = title.trim();
    if let Ok(id) = title.parse::<NoteId>()
        && let Ok(note) = store.get_by_id(&id)
    {
        return Ok(note);
    }

    let project = context.current_project();
    let branch = context.current_branch();
    let filter = NoteFilter::ProjectBranch {
        project: project.clone(),
        branch: branch.clone(),
    };
    if let Some(existing) = newest(titled(store.find(&filter)?, Some(title))) {
        return Ok(existing);
    }

    let mut draft = NewNote::new(title).project(project).branch(branch);
    if let Some(ticket) = ticket {
        draft = draft.ticket(ticket);
    }
    create(store, draft)
}

/// Candidates in the current project and branch, optionally by title.
pub(crate) fn branch_target(
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    title: Option<&str>,
) -> Result<Target> {
    let project = context.current_project();
    let branch = context.current_branch();
    let filter = NoteFilter::ProjectBranch {
        project: project.clone(),
        branch: branch.clone(),
    };
    let candidates = titled(store.find(&filter)?, title);

    pick(candidates, filter, || {
        let title = title
            .map(str::to_string)
            .unwrap_or_else(|| format!("{branch} notes"));
        create(store, NewNote::new(title).project(project).branch(branch))
    })
}

/// With a title, candidates are notes of that title in the project on any
/// branch; without one, the project's misc bucket.
pub(crate) fn project_target(
    store: &mut NoteStore,
    context: &dyn ContextResolver,
    title: Option<&str>,
) -> Result<Target> {
    let project = context.current_project();
    let candidates = match title {
        Some(_) => titled(store.get_in_project(&project)?, title),
        None => store.get_project_misc(&project)?,
    };

    pick(candidates, NoteFilter::Project(project.clone()), || {
        let title = title.unwrap_or(&project).to_string();
        create(store, NewNote::new(title).project(project.as_str()))
    })
}

fn pick(
    mut candidates: Vec<Note>,
    browse: NoteFilter,
    create: impl FnOnce() -> Result<Note>,
) -> Result<Target> {
    match candidates.len() {
        0 => create().map(Target::Note),
        1 => Ok(Target::Note(candidates.remove(0))),
        n => {
            log::info!("{n} candidates; browsing {browse:?}");
            Ok(Target::Browse(browse))
        }
    }
}

fn titled(notes: Vec<Note>, title: Option<&str>) -> Vec<Note> {
    match title.map(str::trim) {
        Some(title) => notes.into_iter().filter(|n| n.title() == title).collect(),
        None => notes,
    }
}

fn newest(notes: Vec<Note>) -> Option<Note> {
    notes.into_iter().max_by_key(|n| n.modified())
}

fn create(store: &mut NoteStore, draft: NewNote) -> Result<Note> {
    let title = draft.title.clone();
    let note = store
        .create(draft)
        .with_context(|| format!("failed to create note '{title}'"))?;
    log::info!("created {} at {}", note, note.path().display());
    Ok(note)
}
