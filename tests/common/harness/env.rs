//! Isolated test environment with temp directory.

use super::{JotCommand, TestNote};
use anyhow::Result;
use jot::domain::Note;
use jot::store::{NoteLayout, NoteStore, RecordingOpener, SqliteRepository};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// Layout under the temp root:
/// - `data/` data directory passed with `--dir`
/// - `widget/` working directory, so the project resolves to `widget`
/// - `home/` stands in for `$HOME` and `$XDG_CONFIG_HOME`
///
/// Everything is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
    data_dir: PathBuf,
    work_dir: PathBuf,
    home_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let data_dir = root.join("data");
        let work_dir = root.join("widget");
        let home_dir = root.join("home");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home dir");
        Self {
            _temp_dir: temp_dir,
            root,
            data_dir,
            work_dir,
            home_dir,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the working directory the CLI runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the notes root inside the data directory.
    pub fn notes_root(&self) -> PathBuf {
        self.data_dir.join("notes")
    }

    /// Returns the path where the SQLite database is stored.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("notes.db")
    }

    /// Returns the config file the CLI reads.
    pub fn config_path(&self) -> PathBuf {
        self.home_dir.join(".config").join("jot").join("config.toml")
    }

    /// Writes a config file for the CLI.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("Failed to create config dir");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Opens the environment's note store directly.
    pub fn store(&self) -> Result<NoteStore> {
        let repo = SqliteRepository::open(&self.db_path())?;
        Ok(NoteStore::new(
            Box::new(repo),
            NoteLayout::new(self.notes_root()),
            Box::new(RecordingOpener::new()),
        ))
    }

    /// Creates a note through the library and returns it.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        self.store()
            .expect("Failed to open store")
            .create(test_note.to_new_note())
            .expect("Failed to create test note")
    }

    /// Creates a JotCommand configured for this test environment.
    pub fn cmd(&self) -> JotCommand {
        let home = self.home_dir.to_string_lossy();
        JotCommand::new()
            .dir(&self.data_dir)
            .current_dir(&self.work_dir)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", self.home_dir.join(".config").to_string_lossy())
            .env("GIT_CEILING_DIRECTORIES", self.root.to_string_lossy())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot::domain::NoteId;

    #[test]
    fn test_env_creates_temp_directories() {
        let env = TestEnv::new();
        assert!(env.work_dir().is_dir());
        assert!(env.work_dir().ends_with("widget"));
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.work_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }

    #[test]
    fn test_env_add_note_creates_file_and_record() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("Seeded"));

        assert!(note.path().exists());
        assert!(note.path().starts_with(env.notes_root()));
        assert!(env.db_path().exists());

        let store = env.store().unwrap();
        let id: NoteId = note.id().clone();
        assert_eq!(store.get_by_id(&id).unwrap().title(), "Seeded");
    }
}
