//! Configuration file support.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::{ensure_parent, write_atomic};
use crate::store::{
    EditorOpener, NoteLayout, NoteStore, Opener, SqliteRepository, SystemOpener,
};

/// Name of the data directory under the home directory.
const DEFAULT_DIR_NAME: &str = ".jot";

/// Database file inside the data directory.
const DB_FILE: &str = "notes.db";

/// Notes root inside the data directory.
const NOTES_DIR_NAME: &str = "notes";

/// Session log file inside the data directory.
pub const LOG_FILE: &str = "jot.log";

/// Where note records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SQLite database in the data directory
    #[default]
    Sqlite,
    /// In-process only; records vanish on exit
    Memory,
}

/// Application configuration loaded from config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Data directory holding the database and notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Notes root, if not `<dir>/notes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_dir: Option<PathBuf>,

    /// Editor command for opening notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// The editor runs on its own (a GUI editor); never hand it the terminal
    pub editor_background: bool,

    pub backend: Backend,

    /// Start the interactive session in search mode
    pub start_in_search: bool,

    /// Extension for new note files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Writes the configuration back to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        ensure_parent(path)?;
        write_atomic(path, &contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/jot/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jot")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. `~/.jot`
    pub fn data_dir(&self, cli_dir: Option<&Path>) -> PathBuf {
        cli_dir
            .map(Path::to_path_buf)
            .or_else(|| self.dir.as_deref().map(expand_home))
            .unwrap_or_else(default_data_dir)
    }

    /// Root directory for note files.
    pub fn notes_root(&self, data_dir: &Path) -> PathBuf {
        self.notes_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| data_dir.join(NOTES_DIR_NAME))
    }

    pub fn db_path(data_dir: &Path) -> PathBuf {
        data_dir.join(DB_FILE)
    }

    pub fn layout(&self, data_dir: &Path) -> NoteLayout {
        let layout = NoteLayout::new(self.notes_root(data_dir));
        match &self.extension {
            Some(ext) => layout.with_extension(ext),
            None => layout,
        }
    }

    /// The configured editor, or the platform's default opener.
    pub fn opener(&self) -> Box<dyn Opener> {
        match self.editor.as_deref().map(str::trim) {
            Some(cmd) if !cmd.is_empty() => {
                Box::new(EditorOpener::new(cmd).background(self.editor_background))
            }
            _ => Box::new(SystemOpener::new()),
        }
    }

    /// Opens the note store selected by `backend`.
    pub fn open_store(&self, data_dir: &Path) -> Result<NoteStore> {
        let layout = self.layout(data_dir);
        match self.backend {
            Backend::Sqlite => {
                let db_path = Self::db_path(data_dir);
                let repo = SqliteRepository::open(&db_path).with_context(|| {
                    format!("failed to open note database at {}", db_path.display())
                })?;
                Ok(NoteStore::new(Box::new(repo), layout, self.opener()))
            }
            Backend::Memory => {
                log::info!("using in-memory note records");
                Ok(NoteStore::in_memory(layout, self.opener()))
            }
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
