//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `jot` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct JotCommand {
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl JotCommand {
    /// Creates a new command for the `jot` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Sets the `--dir` option to specify the data directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Runs the binary from `path`.
    pub fn current_dir(mut self, path: &Path) -> Self {
        self.current_dir = Some(path.to_path_buf());
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs.push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("jot").expect("Failed to find jot binary");
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.env_remove("RUST_LOG");
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `open` command with a title.
    pub fn open(self, title: &str) -> Self {
        self.args(["open", title])
    }

    /// Configures for the `branch` command.
    pub fn branch(self) -> Self {
        self.args(["branch"])
    }

    /// Configures for the `proj` command.
    pub fn proj(self) -> Self {
        self.args(["proj"])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `tag` command.
    pub fn tag(self, note: &str, tags: &[&str]) -> Self {
        self.args(["tag", note]).args(tags)
    }

    /// Configures for the `rm` command.
    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    /// Configures for the `editor` command.
    pub fn editor(self, command: &str) -> Self {
        self.args(["editor", command])
    }

    // ===========================================
    // Options
    // ===========================================

    /// Adds `--print-path` so no opener is launched.
    pub fn print_path(self) -> Self {
        self.args(["--print-path"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for JotCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ===========================================
    // JotCommand Basics
    // ===========================================

    #[test]
    fn test_command_runs_binary() {
        JotCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_dir() {
        let temp = TempDir::new().unwrap();
        let cmd = JotCommand::new().dir(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_output_success() {
        let output = JotCommand::new().args(["--help"]).output_success();
        assert!(output.contains("jot") || output.contains("notes"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = JotCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }

    #[test]
    fn test_tag_shortcut_appends_tags() {
        let cmd = JotCommand::new().tag("todo", &["a", "b"]);
        assert_eq!(cmd.get_args(), ["tag", "todo", "a", "b"]);
    }
}
