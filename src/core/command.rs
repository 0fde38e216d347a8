//! 命令系统：语义命令定义
//!
//! Key bindings and menu items both resolve to a `Command`; the app executes
//! commands through a single dispatcher, whatever produced them.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 光标移动 ====================
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,

    // ==================== 编辑操作 ====================
    InsertChar(char),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,

    // ==================== 滚动操作 ====================
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ==================== 文件操作 ====================
    NewFile,
    OpenFile,
    Save,
    SaveAs,
    Quit,

    // ==================== 菜单 ====================
    OpenMenu,
    Escape,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::InsertChar(_) => "insertChar",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::ScrollUp => "scrollUp",
            Command::ScrollDown => "scrollDown",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::NewFile => "newFile",
            Command::OpenFile => "openFile",
            Command::Save => "save",
            Command::SaveAs => "saveAs",
            Command::Quit => "quit",
            Command::OpenMenu => "openMenu",
            Command::Escape => "escape",
        }
    }

    /// Inverse of [`Command::name`]. `insertChar` carries data and cannot be
    /// bound by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.trim() {
            "cursorLeft" => Command::CursorLeft,
            "cursorRight" => Command::CursorRight,
            "cursorUp" => Command::CursorUp,
            "cursorDown" => Command::CursorDown,
            "cursorLineStart" => Command::CursorLineStart,
            "cursorLineEnd" => Command::CursorLineEnd,
            "cursorFileStart" => Command::CursorFileStart,
            "cursorFileEnd" => Command::CursorFileEnd,
            "insertNewline" => Command::InsertNewline,
            "insertTab" => Command::InsertTab,
            "deleteBackward" => Command::DeleteBackward,
            "deleteForward" => Command::DeleteForward,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "scrollUp" => Command::ScrollUp,
            "scrollDown" => Command::ScrollDown,
            "pageUp" => Command::PageUp,
            "pageDown" => Command::PageDown,
            "newFile" => Command::NewFile,
            "openFile" => Command::OpenFile,
            "save" => Command::Save,
            "saveAs" => Command::SaveAs,
            "quit" => Command::Quit,
            "openMenu" => Command::OpenMenu,
            "escape" => Command::Escape,
            _ => return None,
        };
        Some(command)
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::InsertTab
                | Command::DeleteBackward
                | Command::DeleteForward
                | Command::Undo
                | Command::Redo
        )
    }

    pub fn is_file_command(&self) -> bool {
        matches!(
            self,
            Command::NewFile | Command::OpenFile | Command::Save | Command::SaveAs | Command::Quit
        )
    }
}
