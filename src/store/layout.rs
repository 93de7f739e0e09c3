//! On-disk layout of note files.

use chrono::{DateTime, Utc};
use std::path::{Component, Path, PathBuf};

/// Default extension for note files.
pub const DEFAULT_EXTENSION: &str = "md";

/// Where note files live and how they are named.
///
/// A derived path has the shape `root/project/[ticket/]branch/title.ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLayout {
    root: PathBuf,
    extension: String,
}

impl NoteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Overrides the file extension (a leading dot is ignored).
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        let ext = extension.as_ref().trim().trim_start_matches('.');
        self.extension = if ext.is_empty() {
            DEFAULT_EXTENSION.to_string()
        } else {
            ext.to_string()
        };
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Derives the logical path for a note.
    ///
    /// Empty labels contribute no directory; the ticket level only appears
    /// when a ticket is set. Labels may nest (`feature/login` becomes two
    /// directories) but `.` and `..` components are dropped so the result
    /// always stays under the root. Separators in the title are replaced so
    /// the title names exactly one file.
    pub fn derive_path(&self, project: &str, ticket: &str, branch: &str, title: &str) -> PathBuf {
        let mut path = self.root.clone();
        for label in [project, ticket, branch] {
            push_label(&mut path, label);
        }
        path.push(format!("{}.{}", file_stem(title), self.extension));
        path
    }

    /// Makes an explicit path absolute by anchoring relative paths at the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn push_label(path: &mut PathBuf, label: &str) {
    for component in Path::new(label).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
}

fn file_stem(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// Renders the initial contents of a new note file.
pub fn render_template(
    title: &str,
    created: DateTime<Utc>,
    project: &str,
    branch: &str,
    ticket: &str,
) -> String {
    let mut content = format!(
        "# {}\n\nCreated: {}\nProject: {}\nBranch: {}\n",
        title,
        created.format("%Y-%m-%d %H:%M:%S"),
        project,
        branch
    );
    if !ticket.is_empty() {
        content.push_str(&format!("Ticket: {}\n", ticket));
    }
    content.push_str("\n---\n\n");
    content
}
