//! Launching note files in an external program.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// A program that could not be started.
#[derive(Debug, Error)]
#[error("failed to launch '{command}': {source}")]
pub struct LaunchError {
    /// The full command line, path included.
    pub command: String,
    #[source]
    pub source: io::Error,
}

/// Hands a note file to something outside the process.
pub trait Opener {
    /// Launches the program on `path` and returns as soon as it has started.
    fn open(&self, path: &Path) -> Result<(), LaunchError>;

    /// Launches the program with the terminal handed over, for callers that
    /// are not drawing to it themselves. Programs that never need a terminal
    /// launch exactly as [`Opener::open`] does.
    fn open_attached(&self, path: &Path) -> Result<(), LaunchError> {
        self.open(path)
    }
}

/// Opens files with the platform's default handler.
#[derive(Debug, Default)]
pub struct SystemOpener {
    launched: Launched,
}

impl SystemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "start", ""]).arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), LaunchError> {
        self.launched.spawn(&mut Self::command(path))
    }
}

/// Opens files with a configured editor command line such as
/// `open -a "Visual Studio Code"`.
///
/// The command line is split the way a POSIX shell splits words. A
/// foreground editor takes over the terminal on [`Opener::open_attached`]
/// and is waited for; a background editor is always launched detached.
#[derive(Debug, Default)]
pub struct EditorOpener {
    command: String,
    background: bool,
    launched: Launched,
}

impl EditorOpener {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Marks the editor as one that runs on its own, such as a GUI editor.
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    pub fn command_line(&self) -> &str {
        &self.command
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    /// The program and its leading arguments.
    fn argv(&self) -> Result<Vec<String>, LaunchError> {
        let invalid = |reason: &str| LaunchError {
            command: self.command.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, reason.to_string()),
        };

        let words = shlex::split(&self.command).ok_or_else(|| invalid("unbalanced quotes"))?;
        if words.is_empty() {
            return Err(invalid("editor command is empty"));
        }
        Ok(words)
    }

    fn command(&self, path: &Path) -> Result<Command, LaunchError> {
        let argv = self.argv()?;
        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]).arg(path);
        Ok(cmd)
    }
}

impl Opener for EditorOpener {
    fn open(&self, path: &Path) -> Result<(), LaunchError> {
        let mut cmd = self.command(path)?;
        self.launched.spawn(&mut cmd)
    }

    fn open_attached(&self, path: &Path) -> Result<(), LaunchError> {
        if self.background {
            return self.open(path);
        }
        run_attached(&mut self.command(path)?)
    }
}

/// Records every path it is asked to open instead of launching anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths opened so far, oldest first.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl Opener for RecordingOpener {
    fn open(&self, path: &Path) -> Result<(), LaunchError> {
        if let Ok(mut paths) = self.opened.lock() {
            paths.push(path.to_path_buf());
        }
        Ok(())
    }
}

/// Detached children, reaped once they exit.
#[derive(Debug, Default)]
struct Launched {
    children: Mutex<Vec<Child>>,
}

impl Launched {
    /// Starts `cmd` without waiting for it or inheriting stdio.
    ///
    /// Children from earlier launches that have exited are reaped first.
    fn spawn(&self, cmd: &mut Command) -> Result<(), LaunchError> {
        let display = describe(cmd);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().map_err(|source| LaunchError {
            command: display.clone(),
            source,
        })?;
        log::debug!("launched '{}' (pid {})", display, child.id());

        if let Ok(mut children) = self.children.lock() {
            reap(&mut children);
            children.push(child);
        }
        Ok(())
    }

    /// Reaps exited children and returns how many are still running.
    fn running(&self) -> usize {
        match self.children.lock() {
            Ok(mut children) => {
                reap(&mut children);
                children.len()
            }
            Err(_) => 0,
        }
    }
}

fn reap(children: &mut Vec<Child>) {
    children.retain_mut(|child| match child.try_wait() {
        Ok(None) => true,
        Ok(Some(status)) => {
            log::debug!("pid {} exited with {}", child.id(), status);
            false
        }
        Err(e) => {
            log::debug!("could not wait on pid {}: {}", child.id(), e);
            false
        }
    });
}

/// Runs `cmd` in the foreground with the terminal inherited and waits for it.
fn run_attached(cmd: &mut Command) -> Result<(), LaunchError> {
    let display = describe(cmd);
    log::debug!("running '{}' in the foreground", display);

    let status = cmd.status().map_err(|source| LaunchError {
        command: display.clone(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(LaunchError {
            command: display,
            source: io::Error::other(format!("editor exited with {status}")),
        })
    }
}

fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
