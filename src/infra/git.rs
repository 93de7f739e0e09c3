//! Working-context resolution from git.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Project name used when neither git nor the working directory help.
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Branch name used when git cannot report one.
pub const DEFAULT_BRANCH: &str = "main";

/// Source of the (project, branch) labels attached to new notes.
///
/// Implementations read the environment at call time and never cache.
pub trait ContextResolver {
    fn current_project(&self) -> String;
    fn current_branch(&self) -> String;
}

/// Resolves context by asking git, optionally from a fixed directory.
#[derive(Debug, Clone, Default)]
pub struct GitContext {
    workdir: Option<PathBuf>,
}

impl GitContext {
    /// Resolves against the process's current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves against `dir` instead of the current directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn git(&self, args: &[&str]) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                log::debug!("git {} could not run: {}", args.join(" "), e);
                return None;
            }
        };
        if !output.status.success() {
            log::debug!("git {} exited with {}", args.join(" "), output.status);
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    fn workdir(&self) -> Option<PathBuf> {
        self.workdir
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }
}

impl ContextResolver for GitContext {
    fn current_project(&self) -> String {
        let remote = self.git(&["remote", "get-url", "origin"]);
        resolve_project(remote.as_deref(), self.workdir().as_deref())
    }

    fn current_branch(&self) -> String {
        self.git(&["branch", "--show-current"])
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
    }
}

/// A context that always reports the same labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedContext {
    pub project: String,
    pub branch: String,
}

impl FixedContext {
    pub fn new(project: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            branch: branch.into(),
        }
    }
}

impl ContextResolver for FixedContext {
    fn current_project(&self) -> String {
        self.project.clone()
    }

    fn current_branch(&self) -> String {
        self.branch.clone()
    }
}

/// Extracts a project name from a remote URL.
///
/// Takes the last segment after `/` or `:` and strips a trailing `.git`.
/// Works for HTTPS (`https://host/org/widget.git`), SSH
/// (`git@host:org/widget.git`) and local path remotes.
pub fn project_from_remote_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);

    (!name.is_empty()).then(|| name.to_string())
}

/// Picks the project name from the remote URL, then the directory name, then
/// [`UNKNOWN_PROJECT`].
pub fn resolve_project(remote_url: Option<&str>, workdir: Option<&Path>) -> String {
    remote_url
        .and_then(project_from_remote_url)
        .or_else(|| {
            workdir
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}
