//! 文本缓冲区模型
//!
//! 职责：
//! - 文本存储（Rope）
//! - 光标管理（行 + 字素列）
//! - 行列 ↔ 字符偏移映射

use super::edit_op::{EditOp, OpKind};
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Every char ropey starts a new line after (CRLF counts as one break).
const LINE_BREAKS: [char; 7] = [
    '\n', '\u{000B}', '\u{000C}', '\r', '\u{0085}', '\u{2028}', '\u{2029}',
];

fn strip_line_break(line: &str) -> &str {
    line.trim_end_matches(LINE_BREAKS)
}

#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: (usize, usize),
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: (0, 0),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: (0, 0),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// (row, grapheme column)
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Clamps to an existing position.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.len_lines().saturating_sub(1));
        let col = col.min(self.line_grapheme_len(row));
        self.cursor = (row, col);
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_slice(&self, row: usize) -> Option<RopeSlice<'_>> {
        if row < self.rope.len_lines() {
            Some(self.rope.line(row))
        } else {
            None
        }
    }

    /// The line without its line break.
    pub fn line_text(&self, row: usize) -> Option<Cow<'_, str>> {
        let line = slice_to_cow(self.line_slice(row)?);
        Some(match line {
            Cow::Borrowed(s) => Cow::Borrowed(strip_line_break(s)),
            Cow::Owned(s) => Cow::Owned(strip_line_break(&s).to_string()),
        })
    }

    pub fn pos_to_char(&self, pos: (usize, usize)) -> usize {
        self.rope.line_to_char(pos.0) + self.grapheme_to_char_index(pos.0, pos.1)
    }

    pub fn char_to_pos(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_offset);
        let in_line = char_offset - self.rope.line_to_char(row);
        let line = slice_to_cow(self.rope.line(row));
        let mut chars = 0;
        let mut col = 0;
        for g in line.graphemes(true) {
            if chars >= in_line {
                break;
            }
            chars += g.chars().count();
            col += 1;
        }
        (row, col)
    }

    pub fn grapheme_to_char_index(&self, row: usize, grapheme_index: usize) -> usize {
        let slice = self.rope.line(row);
        let line = slice_to_cow(slice);
        strip_line_break(&line)
            .graphemes(true)
            .take(grapheme_index)
            .map(|g| g.chars().count())
            .sum()
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        match self.line_text(row) {
            Some(line) => line.graphemes(true).count(),
            None => 0,
        }
    }

    // ==================== 光标移动 ====================

    pub fn move_left(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_grapheme_len(row - 1));
        }
    }

    pub fn move_right(&mut self) {
        let (row, col) = self.cursor;
        if col < self.line_grapheme_len(row) {
            self.cursor = (row, col + 1);
        } else if row + 1 < self.len_lines() {
            self.cursor = (row + 1, 0);
        }
    }

    pub fn move_vertical(&mut self, delta: isize) {
        let (row, col) = self.cursor;
        let last = self.len_lines().saturating_sub(1) as isize;
        let target = (row as isize + delta).clamp(0, last) as usize;
        self.set_cursor(target, col);
    }

    pub fn move_line_start(&mut self) {
        self.cursor.1 = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor.1 = self.line_grapheme_len(self.cursor.0);
    }

    pub fn move_file_start(&mut self) {
        self.cursor = (0, 0);
    }

    pub fn move_file_end(&mut self) {
        let row = self.len_lines().saturating_sub(1);
        self.cursor = (row, self.line_grapheme_len(row));
    }

    // ==================== 原子操作方法（返回 EditOp）====================

    pub fn insert_str_op(&mut self, s: &str) -> Option<EditOp> {
        if s.is_empty() {
            return None;
        }
        let cursor_before = self.cursor;
        let char_offset = self.pos_to_char(cursor_before);

        self.rope.insert(char_offset, s);
        let cursor_after = self.char_to_pos(char_offset + s.chars().count());
        self.cursor = cursor_after;

        Some(EditOp::insert(
            char_offset,
            s.to_string(),
            cursor_before,
            cursor_after,
        ))
    }

    /// 向后删除（Backspace）
    pub fn delete_backward_op(&mut self) -> Option<EditOp> {
        let (row, col) = self.cursor;
        let cursor_before = self.cursor;

        let (start, end, cursor_after) = if col > 0 {
            let start = self.pos_to_char((row, col - 1));
            let end = self.pos_to_char((row, col));
            (start, end, (row, col - 1))
        } else if row > 0 {
            let prev_len = self.line_grapheme_len(row - 1);
            let end = self.rope.line_to_char(row);
            let start = self.pos_to_char((row - 1, prev_len));
            (start, end, (row - 1, prev_len))
        } else {
            return None;
        };

        let deleted = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.cursor = cursor_after;

        Some(EditOp::delete(start, end, deleted, cursor_before, cursor_after))
    }

    /// 向前删除（Delete）
    pub fn delete_forward_op(&mut self) -> Option<EditOp> {
        let (row, col) = self.cursor;
        let line_len = self.line_grapheme_len(row);

        let (start, end) = if col < line_len {
            (self.pos_to_char((row, col)), self.pos_to_char((row, col + 1)))
        } else if row + 1 < self.len_lines() {
            (self.pos_to_char((row, col)), self.rope.line_to_char(row + 1))
        } else {
            return None;
        };

        let deleted = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);

        Some(EditOp::delete(start, end, deleted, self.cursor, self.cursor))
    }

    // ==================== Undo/Redo 支持 ====================

    pub fn apply_kind(&mut self, kind: &OpKind, cursor: (usize, usize)) {
        kind.apply(&mut self.rope);
        self.set_cursor(cursor.0, cursor.1);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_buffer.rs"]
mod tests;
