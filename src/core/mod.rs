//! 核心抽象：命令、输入事件与单行输入框

pub mod command;
pub mod event;
pub mod line_input;

pub use command::Command;
pub use event::{InputEvent, Key};
pub use line_input::LineInput;
