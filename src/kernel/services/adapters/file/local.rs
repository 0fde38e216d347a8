//! 本地文件系统 Provider
//!
//! Text is read and written as UTF-8, byte for byte: no newline is added or
//! stripped on either side.

use crate::kernel::services::ports::file::{DirEntry, FileError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| FileError::read(path, e))
    }

    pub fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).map_err(|e| FileError::write(path, e))
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    pub fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Directories first, then files, each group sorted case-insensitively.
    pub fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let iter = fs::read_dir(path).map_err(|e| FileError::read(path, e))?;

        for entry in iter {
            let entry = entry.map_err(|e| FileError::read(path, e))?;
            let entry_path = entry.path();
            let is_dir = entry
                .file_type()
                .map(|t| t.is_dir())
                .unwrap_or(false)
                || entry_path.is_dir();

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry_path,
                is_dir,
            });
        }

        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        Ok(entries)
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/local.rs"]
mod tests;
