//! Service adapters: OS specific implementations.

pub mod data_dir;
pub mod file;
#[cfg(feature = "tui")]
pub mod keybinding;
pub mod settings;

pub use data_dir::{ensure_log_dir, get_app_data_dir, get_log_dir};
pub use file::LocalFileProvider;
#[cfg(feature = "tui")]
pub use keybinding::{format_key, parse_keybinding, KeybindingService};
pub use settings::{ensure_settings_file, get_settings_path, load_settings_from};
