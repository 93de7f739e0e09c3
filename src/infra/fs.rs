//! Backing-file I/O for notes with atomic writes.

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations on note files.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path has no parent directory: {path}")]
    NoParent { path: PathBuf },
}

impl FsError {
    /// The path the failed operation was acting on.
    pub fn path(&self) -> &Path {
        match self {
            FsError::CreateDir { path, .. }
            | FsError::Write { path, .. }
            | FsError::Remove { path, .. }
            | FsError::NoParent { path } => path,
        }
    }
}

/// Creates every missing directory above `path`.
pub fn ensure_parent(path: &Path) -> Result<(), FsError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| FsError::NoParent { path: path.into() })?;

    fs::create_dir_all(parent).map_err(|source| FsError::CreateDir {
        path: parent.into(),
        source,
    })
}

/// Writes `contents` to `path` through a temporary file and rename.
///
/// The parent directory must already exist. An existing file is replaced.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::NoParent { path: path.into() })?;

    let write_err = |source| FsError::Write {
        path: path.into(),
        source,
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(contents.as_bytes()).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Removes a file, treating an already-missing file as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, FsError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FsError::Remove {
            path: path.into(),
            source,
        }),
    }
}
