//! Tab completion for the path prompts.

use crate::kernel::services::adapters::LocalFileProvider;
use crate::kernel::services::ports::{DirEntry, FileFilter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// The input after completion. Unchanged when nothing matched.
    pub value: String,
    /// Matching names (directories end with `/`) when the match is ambiguous.
    pub candidates: Vec<String>,
}

fn split_input(input: &str) -> (&str, &str) {
    match input.rfind(is_separator) {
        Some(idx) => input.split_at(idx + 1),
        None => ("", input),
    }
}

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == std::path::MAIN_SEPARATOR
}

fn visible(entry: &DirEntry, prefix: &str, filters: &[FileFilter]) -> bool {
    if !entry.name.starts_with(prefix) {
        return false;
    }
    if entry.name.starts_with('.') && !prefix.starts_with('.') {
        return false;
    }
    entry.is_dir || filters.is_empty() || filters.iter().any(|f| f.matches(&entry.name))
}

fn common_prefix<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut common: Option<&str> = None;
    for name in names {
        common = Some(match common {
            None => name,
            Some(current) => {
                let end = current
                    .char_indices()
                    .zip(name.chars())
                    .find(|((_, a), b)| a != b)
                    .map(|((i, _), _)| i)
                    .unwrap_or_else(|| current.len().min(name.len()));
                &current[..end]
            }
        });
    }
    common.unwrap_or_default().to_string()
}

/// Completes the last path component of `input` against the entries of its
/// directory. Relative input is looked up under `base`. Directories are
/// always offered; files only when one of `filters` matches.
pub fn complete_path(
    input: &str,
    base: &Path,
    filters: &[FileFilter],
    provider: &LocalFileProvider,
) -> Completion {
    let (dir_part, prefix) = split_input(input);
    let dir = base.join(dir_part);
    let dir = if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir
    };

    let entries = match provider.read_dir(&dir) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::debug!(dir = %dir.display(), error = %error, "completion: cannot list");
            return Completion {
                value: input.to_string(),
                candidates: Vec::new(),
            };
        }
    };

    let matches: Vec<&DirEntry> = entries
        .iter()
        .filter(|e| visible(e, prefix, filters))
        .collect();

    match matches.as_slice() {
        [] => Completion {
            value: input.to_string(),
            candidates: Vec::new(),
        },
        [only] => {
            let mut value = format!("{dir_part}{}", only.name);
            if only.is_dir {
                value.push('/');
            }
            Completion {
                value,
                candidates: Vec::new(),
            }
        }
        many => {
            let common = common_prefix(many.iter().map(|e| e.name.as_str()));
            let value = if common.len() > prefix.len() {
                format!("{dir_part}{common}")
            } else {
                input.to_string()
            };
            let candidates = many
                .iter()
                .map(|e| {
                    if e.is_dir {
                        format!("{}/", e.name)
                    } else {
                        e.name.clone()
                    }
                })
                .collect();
            Completion { value, candidates }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/completion.rs"]
mod tests;
