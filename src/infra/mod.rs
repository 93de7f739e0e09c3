//! File I/O and source-control context

mod fs;
mod git;

pub use fs::{FsError, ensure_parent, remove_if_exists, write_atomic};
pub use git::{
    ContextResolver, DEFAULT_BRANCH, FixedContext, GitContext, UNKNOWN_PROJECT,
    project_from_remote_url, resolve_project,
};
