//! blockedit - single-document terminal text editor
//!
//! Module layout:
//! - kernel: document state, the save/discard/cancel gate, status line, service ports/adapters
//! - models: rope-backed text buffer and its edit history
//! - core: commands and input events
//! - tui: terminal setup/teardown and the event source
//! - views: the editable text area
//! - app: menu bar, dialogs, terminal host and the main loop

pub mod kernel;
pub mod models;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod core;
#[cfg(feature = "tui")]
pub mod tui;
#[cfg(feature = "tui")]
pub mod views;
