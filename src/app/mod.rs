//! 应用层：主窗口、菜单、对话框与终端宿主

pub mod completion;
pub mod dialogs;
pub mod host;
pub mod menu;
pub mod notepad;
pub mod theme;

pub use host::TerminalHost;
pub use menu::{MenuBar, MenuOutcome};
pub use notepad::Notepad;
pub use theme::UiTheme;
