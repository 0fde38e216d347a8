//! Single-line text field state used by the prompts.
//!
//! The cursor is a byte offset into `value` and always sits on a char
//! boundary.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    value: String,
    cursor: usize,
}

impl LineInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole value and parks the cursor at the end.
    pub fn set(&mut self, value: String) {
        self.cursor = value.len();
        self.value = value;
    }

    /// Inserts `text` at the cursor, dropping control characters (newlines
    /// included). Returns whether anything was inserted.
    pub fn insert(&mut self, text: &str) -> bool {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return false;
        }
        self.value.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let next = self.next_boundary();
        self.value.drain(self.cursor..next);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
            .unwrap_or(self.value.len())
    }

    /// Byte range `[start, end)` of the value to show in `width` cells with
    /// one cell kept free for the cursor.
    pub fn window(&self, width: usize) -> (usize, usize) {
        if width == 0 {
            return (self.cursor, self.cursor);
        }

        let mut start = self.cursor;
        let mut used = 0usize;
        for (idx, ch) in self.value[..self.cursor].char_indices().rev() {
            let w = ch.width().unwrap_or(0);
            if used + w >= width {
                break;
            }
            used += w;
            start = idx;
        }
        if self.value[..self.cursor].width() < width {
            start = 0;
        }

        let end = start + fit_width(&self.value[start..], width);
        (start, end)
    }

    /// Cells between the window start and the cursor.
    pub fn cursor_column(&self, width: usize) -> usize {
        let (start, _) = self.window(width);
        self.value[start..self.cursor].width()
    }
}

/// Number of leading bytes of `s` that fit into `max_width` cells.
pub fn fit_width(s: &str, max_width: usize) -> usize {
    let mut used = 0usize;
    for (idx, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            return idx;
        }
        used += w;
    }
    s.len()
}

#[cfg(test)]
#[path = "../../tests/unit/core/line_input.rs"]
mod tests;
