//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// jot - notes scoped to your project and branch
#[derive(Parser, Debug)]
#[command(name = "jot", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding the database and notes (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Print the note's path instead of opening it (for editor integrations)
    #[arg(long, global = true, visible_alias = "fromnvim")]
    pub print_path: bool,

    /// Start the interactive session in search mode
    #[arg(long, global = true)]
    pub search: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Without a command, browse all notes interactively
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a note by id or title in the current project and branch, creating it if needed
    Open(OpenArgs),

    /// Open the current branch's note, or browse them if there are several
    Branch(BranchArgs),

    /// Open the current project's note, or browse them if there are several
    Proj(ProjArgs),

    /// List notes
    #[command(name = "ls")]
    List(ListArgs),

    /// Add tags to a note
    Tag(TagArgs),

    /// Delete a note and its file
    Rm(RmArgs),

    /// Set the editor used to open notes
    Editor(EditorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `open` command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Note id, or title within the current project and branch
    pub title: String,

    /// Ticket to attach if the note is created
    #[arg(short, long)]
    pub ticket: Option<String>,
}

/// Arguments for the `branch` command
#[derive(Parser, Debug)]
pub struct BranchArgs {
    /// Title to look for (default: "<branch> notes")
    pub title: Option<String>,
}

/// Arguments for the `proj` command
#[derive(Parser, Debug)]
pub struct ProjArgs {
    /// Title to look for in any branch (default: the project's misc note)
    pub title: Option<String>,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only notes in this project
    #[arg(short, long)]
    pub project: Option<String>,

    /// Only notes on this branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Only notes for this ticket
    #[arg(short, long)]
    pub ticket: Option<String>,

    /// Only the project's notes without a branch (requires --project)
    #[arg(long, requires = "project", conflicts_with = "branch")]
    pub misc: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tag` command
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Note id or title
    pub note: String,

    /// Tags to add
    #[arg(required = true)]
    pub tags: Vec<String>,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note id or title
    pub note: String,
}

/// Arguments for the `editor` command
#[derive(Parser, Debug)]
pub struct EditorArgs {
    /// Editor command line, e.g. "code --wait" (empty to use the system opener)
    pub command: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
