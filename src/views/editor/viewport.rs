//! 编辑器视口管理
//!
//! 负责：
//! - 视口状态（滚动偏移、尺寸）
//! - 坐标转换（字素列 ↔ 屏幕列，tab 展开到下一个 tab stop）

use crate::models::TextBuffer;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct Viewport {
    line_offset: usize,
    height: usize,
    horiz_offset: usize,
    width: usize,
    tab_size: usize,
    /// 是否跟随光标滚动（鼠标滚轮滚动时禁用）
    follow_cursor: bool,
}

impl Viewport {
    pub fn new(tab_size: usize) -> Self {
        Self {
            line_offset: 0,
            height: 20,
            horiz_offset: 0,
            width: 80,
            tab_size: tab_size.max(1),
            follow_cursor: true,
        }
    }

    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn horiz_offset(&self) -> usize {
        self.horiz_offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn reset(&mut self) {
        self.line_offset = 0;
        self.horiz_offset = 0;
        self.follow_cursor = true;
    }

    /// Records the drawable size and, unless the user scrolled away, brings
    /// the cursor back into view.
    pub fn update(&mut self, buffer: &TextBuffer, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);

        let max_offset = buffer.len_lines().saturating_sub(self.height);
        self.line_offset = self.line_offset.min(max_offset);

        if !self.follow_cursor {
            return;
        }

        let (row, _) = buffer.cursor();
        if row < self.line_offset {
            self.line_offset = row;
        } else if row >= self.line_offset + self.height {
            self.line_offset = row + 1 - self.height;
        }

        let cursor_x = self.cursor_display_x(buffer);
        if cursor_x < self.horiz_offset {
            self.horiz_offset = cursor_x;
        } else if cursor_x >= self.horiz_offset + self.width {
            self.horiz_offset = cursor_x + 1 - self.width;
        }
    }

    pub fn scroll_vertical(&mut self, delta: isize, total_lines: usize) {
        // 用户主动滚动时，禁用光标跟随
        self.follow_cursor = false;

        let max_offset = total_lines.saturating_sub(self.height);
        if delta > 0 {
            self.line_offset = (self.line_offset + delta.unsigned_abs()).min(max_offset);
        } else {
            self.line_offset = self.line_offset.saturating_sub(delta.unsigned_abs());
        }
    }

    /// 重新启用光标跟随（当用户进行编辑或移动光标时调用）
    pub fn enable_follow_cursor(&mut self) {
        self.follow_cursor = true;
    }

    pub fn follows_cursor(&self) -> bool {
        self.follow_cursor
    }

    /// Absolute display column of the cursor (not shifted by the scroll).
    pub fn cursor_display_x(&self, buffer: &TextBuffer) -> usize {
        let (row, col) = buffer.cursor();
        let Some(line) = buffer.line_text(row) else {
            return 0;
        };
        let mut x = 0;
        for g in line.graphemes(true).take(col) {
            x += self.grapheme_width(g, x);
        }
        x
    }

    /// Screen cell (relative to the text area) → `(row, grapheme col)`.
    /// Clicks past the end of a line land at its end; clicks below the last
    /// line land on the last line.
    pub fn screen_to_pos(&self, x: u16, y: u16, buffer: &TextBuffer) -> (usize, usize) {
        let last_row = buffer.len_lines().saturating_sub(1);
        let row = (self.line_offset + y as usize).min(last_row);
        let Some(line) = buffer.line_text(row) else {
            return (row, 0);
        };

        let target_x = self.horiz_offset + x as usize;
        let mut display_x = 0;
        let mut col = 0;
        for g in line.graphemes(true) {
            let w = self.grapheme_width(g, display_x);
            if display_x + w / 2 >= target_x && w > 0 {
                return (row, col);
            }
            display_x += w;
            col += 1;
        }
        (row, col)
    }

    /// Width of `g` drawn at display column `display_x`.
    pub fn grapheme_width(&self, g: &str, display_x: usize) -> usize {
        if g == "\t" {
            self.tab_size - display_x % self.tab_size
        } else {
            g.width()
        }
    }

    pub fn visible_range(&self, total_lines: usize) -> (usize, usize) {
        let start = self.line_offset.min(total_lines);
        let end = (start + self.height).min(total_lines);
        (start, end)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(4)
    }
}
