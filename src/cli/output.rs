//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub path: String,
    pub project: String,
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ticket: String,
    pub tags: Vec<String>,
    pub modified: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            path: note.path().to_string_lossy().into_owned(),
            project: note.project().to_string(),
            branch: note.branch().to_string(),
            ticket: note.ticket().to_string(),
            tags: note.tags().to_vec(),
            modified: note.modified().to_rfc3339(),
        }
    }
}
