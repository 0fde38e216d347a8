//! File store port
//!
//! Everything the document core needs from the outside world to move text
//! between the editor and the disk: path pickers, read/write, and the modal
//! prompts used to report on or confirm those operations.

use crate::kernel::status::StatusStyle;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type Result<T> = std::result::Result<T, FileError>;

#[derive(Debug)]
pub enum FileError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl FileError {
    pub fn read(path: &Path, source: io::Error) -> Self {
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        FileError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FileError::Read { path, .. } | FileError::Write { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            FileError::Read { source, .. } | FileError::Write { source, .. } => source.kind(),
        }
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::Read { path, source } => write!(f, "{}: {}", path.display(), source),
            FileError::Write { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Read { source, .. } | FileError::Write { source, .. } => Some(source),
        }
    }
}

/// Answer to a save/discard/cancel prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Save,
    Discard,
    Cancel,
}

/// A named glob shown by the path pickers, e.g. `Text files (*.txt)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

impl FileFilter {
    pub const fn new(label: &'static str, pattern: &'static str) -> Self {
        Self { label, pattern }
    }

    /// Only `*` and `*.<ext>` patterns are supported. Extensions compare
    /// case-insensitively.
    pub fn matches(&self, file_name: &str) -> bool {
        if self.pattern == "*" || self.pattern == "*.*" {
            return true;
        }
        match self.pattern.strip_prefix("*.") {
            Some(ext) => Path::new(file_name)
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
                .unwrap_or(false),
            None => file_name == self.pattern,
        }
    }
}

impl std::fmt::Display for FileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.pattern)
    }
}

pub const TEXT_FILE_FILTERS: &[FileFilter] = &[
    FileFilter::new("Text files", "*.txt"),
    FileFilter::new("Python files", "*.py"),
    FileFilter::new("All files", "*"),
];

/// Appends `.{ext}` when `path` has no extension of its own.
pub fn with_default_extension(mut path: PathBuf, ext: &str) -> PathBuf {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() || path.extension().is_some() || path.file_name().is_none() {
        return path;
    }
    path.set_extension(ext);
    path
}

#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Disk access plus the modal dialogs around it.
///
/// Every dialog method is synchronous: it returns only once the user has
/// answered. `None` from a path picker means the user cancelled.
pub trait FileStore {
    fn choose_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf>;

    fn choose_save_path(&mut self, filters: &[FileFilter], default_ext: &str) -> Option<PathBuf>;

    fn read_text(&mut self, path: &Path) -> Result<String>;

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;

    fn confirm_three_way(&mut self, title: &str, message: &str) -> Choice;

    fn show_error(&mut self, title: &str, message: &str);

    fn show_status(&mut self, message: &str, style: StatusStyle, duration: Duration);
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
