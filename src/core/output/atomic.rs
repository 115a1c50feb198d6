//! Atomic file replacement.
//!
//! Every archive file and store is written through [`StagedWrite`]: the
//! contents are prepared in memory first, then committed by writing a
//! temporary file in the destination directory and renaming it over the
//! target. A reader never sees a half-written file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};

/// File contents waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedWrite {
    /// Destination path
    pub path: PathBuf,
    /// Full file contents
    pub contents: String,
}

impl StagedWrite {
    /// Stages `contents` for `path`.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Writes the staged contents, replacing any existing file.
    pub fn commit(&self) -> Result<()> {
        write_atomic(&self.path, &self.contents)
    }
}

/// Commits staged writes in order, stopping at the first failure.
pub fn commit_all(writes: &[StagedWrite]) -> Result<()> {
    for write in writes {
        write.commit()?;
    }
    Ok(())
}

/// Replaces `path` with `contents` via a temp file and rename.
///
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| ConvertError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
