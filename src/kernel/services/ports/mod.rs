//! Service ports: traits + data contracts.

pub mod config;
pub mod file;
pub mod settings;

pub use config::EditorConfig;
pub use file::{
    with_default_extension, Choice, DirEntry, FileError, FileFilter, FileStore,
    Result as FileResult, TEXT_FILE_FILTERS,
};
pub use settings::{KeybindingRule, Settings, ThemeSettings};
