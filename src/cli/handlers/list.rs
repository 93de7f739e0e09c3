//! List command handler.

use anyhow::{Context, Result};

use super::truncate_str;
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::store::{NoteFilter, NoteStore};

pub fn handle_list(args: &ListArgs, store: &NoteStore) -> Result<()> {
    let notes = select_notes(args, store)?;

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!(
                    "{:<10}  {:<40}  {:<30}  {:>10}",
                    "ID", "Title", "Context", "Modified"
                );
                println!(
                    "{:<10}  {:<40}  {:<30}  {:>10}",
                    "----------",
                    "----------------------------------------",
                    "------------------------------",
                    "----------"
                );

                for note in &notes {
                    let id_short = note.id().prefix();
                    let title = truncate_str(note.title(), 40);
                    let context = truncate_str(&context_label(note), 30);
                    let modified = note.modified().format("%Y-%m-%d").to_string();
                    println!(
                        "{:<10}  {:<40}  {:<30}  {:>10}",
                        id_short, title, context, modified
                    );
                }

                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for note in &notes {
                println!("{}", note.path().display());
            }
        }
    }

    Ok(())
}

/// Notes selected by the list flags, most recently modified first.
pub(crate) fn select_notes(args: &ListArgs, store: &NoteStore) -> Result<Vec<Note>> {
    let filter = list_filter(args);
    let mut notes = store
        .find(&filter)
        .with_context(|| format!("failed to list notes for {filter:?}"))?;

    if let Some(ticket) = &args.ticket {
        notes.retain(|n| n.ticket() == ticket);
    }
    notes.sort_by_key(|n| std::cmp::Reverse(n.modified()));
    Ok(notes)
}

fn list_filter(args: &ListArgs) -> NoteFilter {
    match (&args.project, &args.branch) {
        (Some(project), _) if args.misc => NoteFilter::ProjectMisc(project.clone()),
        (Some(project), Some(branch)) => NoteFilter::ProjectBranch {
            project: project.clone(),
            branch: branch.clone(),
        },
        (Some(project), None) => NoteFilter::Project(project.clone()),
        (None, Some(branch)) => NoteFilter::Branch(branch.clone()),
        (None, None) => match &args.ticket {
            Some(ticket) => NoteFilter::Ticket(ticket.clone()),
            None => NoteFilter::All,
        },
    }
}

/// `project / ticket / branch`, skipping empty labels.
fn context_label(note: &Note) -> String {
    [note.project(), note.ticket(), note.branch()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}
