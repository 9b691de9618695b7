//! Exclusion list persistence
//!
//! The list lives in a single file as one comma-joined line. Every write
//! replaces the whole list; nothing is merged with the previous content.

use crate::constants::SEPARATOR;
use crate::error::{AppError, Result};
use crate::models::ExclusionList;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// File-backed exclusion list, reopened on every call
#[derive(Debug, Clone)]
pub struct ExclusionStore {
    path: PathBuf,
}

impl ExclusionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored symbols, case as stored
    ///
    /// A missing or empty file is an empty list.
    pub fn read(&self) -> Result<ExclusionList> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Exclusion file missing, treating as empty");
                return Ok(ExclusionList::default());
            }
            Err(e) => {
                return Err(AppError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        Ok(ExclusionList::from_stored(parse_line(&content)))
    }

    /// Replace the stored list with `list`, uppercased
    ///
    /// Writes a uniquely named temp file next to the target and renames it
    /// over the target, so readers never observe a truncated or mixed line.
    pub fn write(&self, list: &ExclusionList) -> Result<()> {
        let list = ExclusionList::normalized(list.symbols());
        let line = list.symbols().join(&SEPARATOR.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
            error!(error = %e, dir = %dir.display(), "Failed to create temp file");
            AppError::Io(format!("Failed to create temp file in {}: {}", dir.display(), e))
        })?;

        if let Err(e) = temp.write_all(line.as_bytes()).and_then(|_| temp.flush()) {
            error!(error = %e, path = %temp.path().display(), "Failed to write temp file");
            return Err(AppError::Io(format!(
                "Failed to write {}: {}",
                temp.path().display(),
                e
            )));
        }

        // A failed persist drops the temp file, which removes it
        temp.persist(&self.path).map_err(|e| {
            error!(error = %e.error, "Failed to rename temp file");
            AppError::Io(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        info!(path = %self.path.display(), symbols = ?list.symbols(), "Exclusion list replaced");
        Ok(())
    }
}

/// Split the first line of the file into symbols
fn parse_line(content: &str) -> Vec<String> {
    let line = content.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Vec::new();
    }

    line.split(SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
