use super::editor_view::EditorView;
use super::viewport::Viewport;
use crate::app::theme::UiTheme;
use crate::models::TextBuffer;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub area: Rect,
    pub gutter_area: Rect,
    pub content_area: Rect,
    pub scrollbar_area: Rect,
}

pub fn compute_editor_layout(area: Rect, total_lines: usize, show_line_numbers: bool) -> EditorLayout {
    let scrollbar_width = 1.min(area.width);
    let gutter_width = if show_line_numbers {
        // digits + one space of padding
        let digits = total_lines.max(1).to_string().len() as u16;
        (digits + 1).min(area.width.saturating_sub(scrollbar_width))
    } else {
        0
    };
    let content_width = area
        .width
        .saturating_sub(gutter_width)
        .saturating_sub(scrollbar_width);

    EditorLayout {
        area,
        gutter_area: Rect::new(area.x, area.y, gutter_width, area.height),
        content_area: Rect::new(area.x + gutter_width, area.y, content_width, area.height),
        scrollbar_area: Rect::new(
            area.x + gutter_width + content_width,
            area.y,
            scrollbar_width,
            area.height,
        ),
    }
}

/// Draws the text area and returns where the terminal cursor belongs.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    view: &mut EditorView,
    theme: &UiTheme,
) -> Option<Position> {
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let layout = compute_editor_layout(area, view.buffer().len_lines(), view.show_line_numbers());
    view.layout(layout.content_area);

    let buffer = view.buffer();
    let viewport = view.viewport();

    if layout.gutter_area.width > 0 {
        frame.render_widget(
            EditorGutterWidget {
                buffer,
                viewport,
                theme,
            },
            layout.gutter_area,
        );
    }

    frame.render_widget(EditorContentWidget { buffer, viewport }, layout.content_area);

    if layout.scrollbar_area.width > 0 {
        let total = buffer.len_lines();
        let scrollable = total.saturating_sub(viewport.height());
        let mut state = ScrollbarState::new(scrollable)
            .position(viewport.line_offset())
            .viewport_content_length(viewport.height());
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_style(Style::default().fg(theme.muted_fg))
            .thumb_style(Style::default().fg(theme.accent_fg))
            .render(layout.scrollbar_area, frame.buffer_mut(), &mut state);
    }

    cursor_position(buffer, viewport, layout.content_area)
}

fn cursor_position(buffer: &TextBuffer, viewport: &Viewport, content: Rect) -> Option<Position> {
    if content.width == 0 || content.height == 0 {
        return None;
    }
    let (row, _) = buffer.cursor();
    let (start, end) = viewport.visible_range(buffer.len_lines());
    if row < start || row >= end {
        return None;
    }
    let x = viewport
        .cursor_display_x(buffer)
        .checked_sub(viewport.horiz_offset())?;
    if x >= content.width as usize {
        return None;
    }
    Some(Position::new(
        content.x + x as u16,
        content.y + (row - start) as u16,
    ))
}

struct EditorGutterWidget<'a> {
    buffer: &'a TextBuffer,
    viewport: &'a Viewport,
    theme: &'a UiTheme,
}

impl Widget for EditorGutterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let muted = Style::default().fg(self.theme.muted_fg);
        let active = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        buf.set_style(area, muted);

        let digits = area.width.saturating_sub(1) as usize;
        if digits == 0 {
            return;
        }
        let (start, end) = self.viewport.visible_range(self.buffer.len_lines());
        let cursor_row = self.buffer.cursor().0;
        for (screen_row, row) in (start..end).enumerate() {
            let style = if row == cursor_row { active } else { muted };
            let label = format!("{:>digits$}", row + 1);
            buf.set_stringn(
                area.x,
                area.y + screen_row as u16,
                &label,
                digits,
                style,
            );
        }
    }
}

struct EditorContentWidget<'a> {
    buffer: &'a TextBuffer,
    viewport: &'a Viewport,
}

impl Widget for EditorContentWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let horiz_offset = self.viewport.horiz_offset();
        let right = area.x + area.width;
        let (start, end) = self.viewport.visible_range(self.buffer.len_lines());

        for (screen_row, row) in (start..end).enumerate() {
            let y = area.y + screen_row as u16;
            let Some(line) = self.buffer.line_text(row) else {
                continue;
            };

            let mut display_col = 0usize;
            for g in line.graphemes(true) {
                let width = self.viewport.grapheme_width(g, display_col);
                if width == 0 {
                    continue;
                }
                let col_start = display_col;
                display_col += width;
                if display_col <= horiz_offset {
                    continue;
                }
                // A wide grapheme cut by the left edge is blanked.
                let partial = col_start < horiz_offset;
                let x = area.x + (col_start.max(horiz_offset) - horiz_offset) as u16;
                if x >= right {
                    break;
                }

                if g == "\t" || partial {
                    let cells = (display_col - col_start.max(horiz_offset)) as u16;
                    for dx in 0..cells {
                        if x + dx >= right {
                            break;
                        }
                        buf[(x + dx, y)].set_char(' ');
                    }
                    continue;
                }

                if x + width as u16 > right {
                    break;
                }
                set_cell_symbol(buf, x, y, g);
            }
        }
    }
}

fn set_cell_symbol(buf: &mut Buffer, x: u16, y: u16, symbol: &str) {
    let mut chars = symbol.chars();
    let Some(first) = chars.next() else {
        return;
    };
    if chars.next().is_none() {
        buf[(x, y)].set_char(first);
    } else {
        buf[(x, y)].set_symbol(symbol);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/editor/render.rs"]
mod tests;
