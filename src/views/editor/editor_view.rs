//! 编辑器视图
//!
//! 负责：
//! - 执行光标/编辑/滚动命令
//! - 维护 undo/redo 历史
//! - 鼠标点击定位与滚轮滚动
//!
//! Commands report whether the text changed; the caller turns that into the
//! document's dirty flag. Loading and clearing go through [`TextSurface`] and
//! never count as edits.

use super::viewport::Viewport;
use crate::core::Command;
use crate::kernel::services::ports::EditorConfig;
use crate::kernel::TextSurface;
use crate::models::{EditHistory, EditOp, TextBuffer};
use ratatui::layout::Rect;

pub struct EditorView {
    buffer: TextBuffer,
    history: EditHistory,
    viewport: Viewport,
    scroll_step: usize,
    show_line_numbers: bool,
    /// Text cells of the last render, for mouse hit testing.
    content_area: Option<Rect>,
}

impl EditorView {
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            history: EditHistory::new(),
            viewport: Viewport::new(config.tab_width()),
            scroll_step: config.scroll_step(),
            show_line_numbers: config.show_line_numbers,
            content_area: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut view = Self::new();
        view.buffer = TextBuffer::from_text(text);
        view
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.buffer.cursor()
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn content_area(&self) -> Option<Rect> {
        self.content_area
    }

    /// Records where the text is drawn this frame and scrolls to keep the
    /// cursor visible.
    pub fn layout(&mut self, content_area: Rect) {
        self.content_area = Some(content_area);
        self.viewport.update(
            &self.buffer,
            content_area.height as usize,
            content_area.width as usize,
        );
    }

    /// Runs `command`. Returns true iff the text changed.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::CursorLeft => self.move_cursor(TextBuffer::move_left),
            Command::CursorRight => self.move_cursor(TextBuffer::move_right),
            Command::CursorUp => self.move_cursor(|b| b.move_vertical(-1)),
            Command::CursorDown => self.move_cursor(|b| b.move_vertical(1)),
            Command::CursorLineStart => self.move_cursor(TextBuffer::move_line_start),
            Command::CursorLineEnd => self.move_cursor(TextBuffer::move_line_end),
            Command::CursorFileStart => self.move_cursor(TextBuffer::move_file_start),
            Command::CursorFileEnd => self.move_cursor(TextBuffer::move_file_end),
            Command::PageUp => {
                let height = self.viewport.height() as isize;
                self.viewport
                    .scroll_vertical(-height, self.buffer.len_lines());
                self.move_cursor(|b| b.move_vertical(-height));
            }
            Command::PageDown => {
                let height = self.viewport.height() as isize;
                self.viewport
                    .scroll_vertical(height, self.buffer.len_lines());
                self.move_cursor(|b| b.move_vertical(height));
            }
            Command::ScrollUp => self.scroll_by(-(self.scroll_step as isize)),
            Command::ScrollDown => self.scroll_by(self.scroll_step as isize),
            Command::InsertChar(c) => {
                let mut tmp = [0u8; 4];
                return self.insert_text(c.encode_utf8(&mut tmp));
            }
            Command::InsertNewline => return self.insert_text("\n"),
            Command::InsertTab => return self.insert_text("\t"),
            Command::DeleteBackward => {
                let op = self.buffer.delete_backward_op();
                return self.record(op);
            }
            Command::DeleteForward => {
                let op = self.buffer.delete_forward_op();
                return self.record(op);
            }
            Command::Undo => return self.undo(),
            Command::Redo => return self.redo(),
            _ => {}
        }
        false
    }

    /// Inserts `text` at the cursor. Pasted CR/CRLF line breaks become `\n`.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text.to_string()
        };
        let op = self.buffer.insert_str_op(&text);
        self.record(op)
    }

    /// Inserts `text` as one undo step, never merged with surrounding typing.
    pub fn paste(&mut self, text: &str) -> bool {
        self.history.seal();
        let changed = self.insert_text(text);
        self.history.seal();
        changed
    }

    pub fn undo(&mut self) -> bool {
        let Some(op) = self.history.undo() else {
            return false;
        };
        self.buffer.apply_kind(&op.inverse(), op.cursor_before);
        self.viewport.enable_follow_cursor();
        tracing::trace!("undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(op) = self.history.redo() else {
            return false;
        };
        self.buffer.apply_kind(&op.kind, op.cursor_after);
        self.viewport.enable_follow_cursor();
        tracing::trace!("redo");
        true
    }

    /// Places the cursor at a cell relative to the text area.
    pub fn click(&mut self, x: u16, y: u16) {
        let (row, col) = self.viewport.screen_to_pos(x, y, &self.buffer);
        self.move_cursor(|b| b.set_cursor(row, col));
    }

    /// Wheel scrolling; the cursor stays where it is.
    pub fn scroll_by(&mut self, delta: isize) {
        self.viewport.scroll_vertical(delta, self.buffer.len_lines());
    }

    pub fn scroll_step(&self) -> usize {
        self.scroll_step
    }

    fn move_cursor(&mut self, f: impl FnOnce(&mut TextBuffer)) {
        // 键盘操作时重新启用光标跟随
        self.viewport.enable_follow_cursor();
        self.history.seal();
        f(&mut self.buffer);
    }

    fn record(&mut self, op: Option<EditOp>) -> bool {
        let Some(op) = op else {
            return false;
        };
        self.viewport.enable_follow_cursor();
        self.history.push(op);
        true
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for EditorView {
    fn full_text(&self) -> String {
        self.buffer.text()
    }

    fn set_full_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from_text(text);
        self.history.clear();
        self.viewport.reset();
    }

    fn clear(&mut self) {
        self.set_full_text("");
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/editor/editor_view.rs"]
mod tests;
