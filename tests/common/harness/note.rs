//! Builder for test notes with sensible defaults.

use jot::domain::NewNote;

/// Builder for seeding notes through the library before running the CLI.
///
/// Defaults to the harness working context: project `widget`, branch `main`.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    project: String,
    branch: String,
    ticket: String,
    tags: Vec<String>,
}

impl TestNote {
    /// Creates a new test note with the given title in `widget`/`main`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project: "widget".to_string(),
            branch: "main".to_string(),
            ticket: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn ticket(mut self, ticket: impl Into<String>) -> Self {
        self.ticket = ticket.into();
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Converts to the store's creation input.
    pub fn to_new_note(&self) -> NewNote {
        NewNote::new(&self.title)
            .project(&self.project)
            .branch(&self.branch)
            .ticket(&self.ticket)
            .tags(self.tags.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults_to_harness_context() {
        let draft = TestNote::new("Plan").to_new_note();
        assert_eq!(draft.title, "Plan");
        assert_eq!(draft.project, "widget");
        assert_eq!(draft.branch, "main");
        assert!(draft.ticket.is_empty());
    }

    #[test]
    fn test_note_builder_sets_fields() {
        let draft = TestNote::new("Plan")
            .project("gadget")
            .branch("")
            .ticket("JIRA-1")
            .tag("a")
            .tag("b")
            .to_new_note();
        assert_eq!(draft.project, "gadget");
        assert_eq!(draft.branch, "");
        assert_eq!(draft.ticket, "JIRA-1");
        assert_eq!(draft.tags, vec!["a".to_string(), "b".to_string()]);
    }
}
