//! Command handlers for the CLI.

mod editor;
mod list;
mod manage;
mod open;
mod resolve;
mod session;

#[cfg(test)]
pub(crate) mod tests;

use crate::session::StartMode;

// Re-export public items
pub use editor::{handle_completions, handle_editor};
pub use list::handle_list;
pub use manage::{handle_rm, handle_tag};
pub use open::{Target, handle_branch, handle_open, handle_proj};
pub use resolve::{ResolveResult, resolve_note};
pub use session::handle_session;

// ===========================================
// Shared Utilities
// ===========================================

/// How a resolved note, or a set of candidates, reaches the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delivery {
    /// Print the note's path instead of launching the opener.
    pub print_path: bool,
    /// Initial state when several candidates open a session.
    pub start: StartMode,
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
