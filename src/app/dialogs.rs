//! Modal dialogs: save/discard/cancel confirmation, error message box, the
//! replace-existing-file question and the single-line path prompt used by
//! Open and Save As.
//!
//! A dialog only handles input and paints itself. The host runs it in a
//! nested event loop until it yields [`DialogStep::Done`].

use super::completion::complete_path;
use super::theme::UiTheme;
use crate::core::event::{InputEvent, Key};
use crate::core::line_input::{fit_width, LineInput};
use crate::kernel::services::adapters::LocalFileProvider;
use crate::kernel::services::ports::{Choice, FileFilter};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep<T> {
    Continue,
    Done(T),
}

pub trait Modal {
    type Output;

    fn handle_event(&mut self, event: &InputEvent) -> DialogStep<Self::Output>;

    /// Answer used when input ends while the dialog is still open.
    fn abandon(&self) -> Self::Output;

    /// Paints over `area` and returns the terminal cursor position, if any.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) -> Option<Position>;
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.max(10.min(area.width)).min(area.width);
    let height = height.max(3.min(area.height)).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn pressed_key(event: &InputEvent) -> Option<Key> {
    event.as_key_press().map(|k| Key::from(*k))
}

fn left_click(event: &InputEvent) -> Option<(u16, u16)> {
    let mouse = event.as_mouse()?;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((mouse.column, mouse.row)),
        _ => None,
    }
}

/// Rows `text` needs when wrapped to `width` cells.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.split('\n')
        .map(|line| line.width().max(1).div_ceil(width) as u16)
        .sum()
}

/// Draws the dialog frame and returns the inner area.
fn draw_frame(frame: &mut Frame, popup: Rect, title: &str, theme: &UiTheme) -> Rect {
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border).bg(theme.dialog_bg))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme.dialog_border)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().fg(theme.dialog_fg).bg(theme.dialog_bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    inner
}

struct Buttons {
    labels: &'static [&'static str],
    areas: Vec<Rect>,
}

impl Buttons {
    fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            areas: Vec::new(),
        }
    }

    fn width(&self) -> u16 {
        let labels: usize = self.labels.iter().map(|l| l.width() + 4).sum();
        (labels + 2 * self.labels.len().saturating_sub(1)) as u16
    }

    fn hit(&self, x: u16, y: u16) -> Option<usize> {
        self.areas.iter().position(|a| rect_contains(*a, x, y))
    }

    fn render(&mut self, frame: &mut Frame, row: Rect, selected: usize, theme: &UiTheme) {
        self.areas.clear();
        let mut x = row.x + row.width.saturating_sub(self.width()) / 2;
        let right = row.x + row.width;
        let mut spans = Vec::new();
        for (idx, label) in self.labels.iter().enumerate() {
            let text = format!("[ {label} ]");
            let w = text.width() as u16;
            let style = if idx == selected {
                Style::default()
                    .fg(theme.menu_selected_fg)
                    .bg(theme.menu_selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dialog_fg)
            };
            if x + w <= right {
                self.areas.push(Rect::new(x, row.y, w, 1));
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw("  "));
            x += w + 2;
        }
        spans.pop();
        let line = Line::from(spans).centered();
        frame.render_widget(Paragraph::new(line), row);
    }
}

// ==================== Confirm ====================

const CONFIRM_CHOICES: [Choice; 3] = [Choice::Save, Choice::Discard, Choice::Cancel];

/// "Save changes?" with Save / Don't Save / Cancel.
///
/// Keys: `s`/`y` save, `d`/`n` discard, `c`/Esc cancel, arrows or Tab move
/// the focus, Enter picks the focused button.
pub struct ConfirmDialog {
    title: String,
    message: String,
    selected: usize,
    buttons: Buttons,
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            selected: 0,
            buttons: Buttons::new(&["Save", "Don't Save", "Cancel"]),
        }
    }

    pub fn selected(&self) -> Choice {
        CONFIRM_CHOICES[self.selected]
    }
}

impl Modal for ConfirmDialog {
    type Output = Choice;

    fn handle_event(&mut self, event: &InputEvent) -> DialogStep<Choice> {
        if let Some((x, y)) = left_click(event) {
            return match self.buttons.hit(x, y) {
                Some(idx) => DialogStep::Done(CONFIRM_CHOICES[idx]),
                None => DialogStep::Continue,
            };
        }
        if matches!(event, InputEvent::CloseRequested) {
            return DialogStep::Done(Choice::Cancel);
        }
        let Some(key) = pressed_key(event) else {
            return DialogStep::Continue;
        };

        let count = CONFIRM_CHOICES.len();
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('y') => DialogStep::Done(Choice::Save),
            KeyCode::Char('d') | KeyCode::Char('n') => DialogStep::Done(Choice::Discard),
            KeyCode::Char('c') | KeyCode::Esc => DialogStep::Done(Choice::Cancel),
            KeyCode::Enter => DialogStep::Done(self.selected()),
            KeyCode::Left | KeyCode::BackTab => {
                self.selected = (self.selected + count - 1) % count;
                DialogStep::Continue
            }
            KeyCode::Right | KeyCode::Tab => {
                self.selected = (self.selected + 1) % count;
                DialogStep::Continue
            }
            _ => DialogStep::Continue,
        }
    }

    fn abandon(&self) -> Choice {
        Choice::Cancel
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) -> Option<Position> {
        let text_width = self.message.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (text_width.max(self.buttons.width()).max(self.title.width() as u16) + 6)
            .min(area.width);
        let inner_width = width.saturating_sub(4);
        let height = wrapped_height(&self.message, inner_width) + 5;
        let popup = centered_rect(width, height, area);
        let inner = draw_frame(frame, popup, &self.title, theme);
        if inner.height < 2 || inner.width < 4 {
            return None;
        }

        let body = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 2);
        frame.render_widget(
            Paragraph::new(self.message.as_str()).wrap(Wrap { trim: false }),
            body,
        );
        let buttons_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        self.buttons.render(frame, buttons_row, self.selected, theme);
        None
    }
}

// ==================== Message ====================

/// Error/info box with a single OK button.
pub struct MessageDialog {
    title: String,
    message: String,
    buttons: Buttons,
}

impl MessageDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            buttons: Buttons::new(&["OK"]),
        }
    }
}

impl Modal for MessageDialog {
    type Output = ();

    fn handle_event(&mut self, event: &InputEvent) -> DialogStep<()> {
        if let Some((x, y)) = left_click(event) {
            return match self.buttons.hit(x, y) {
                Some(_) => DialogStep::Done(()),
                None => DialogStep::Continue,
            };
        }
        if matches!(event, InputEvent::CloseRequested) {
            return DialogStep::Done(());
        }
        match pressed_key(event).map(|k| k.code) {
            Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => DialogStep::Done(()),
            _ => DialogStep::Continue,
        }
    }

    fn abandon(&self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) -> Option<Position> {
        let text_width = self.message.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (text_width.max(self.title.width() as u16).max(24) + 6).min(area.width);
        let inner_width = width.saturating_sub(4);
        let height = wrapped_height(&self.message, inner_width) + 5;
        let popup = centered_rect(width, height, area);
        let inner = draw_frame(frame, popup, &self.title, theme);
        if inner.height < 2 || inner.width < 4 {
            return None;
        }

        let body = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 2);
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(Style::default().fg(theme.error_fg))
                .wrap(Wrap { trim: false }),
            body,
        );
        let buttons_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        self.buttons.render(frame, buttons_row, 0, theme);
        None
    }
}

// ==================== Replace ====================

/// "Replace the existing file?" with Yes / No. Focus starts on No.
///
/// Keys: `y` yes, `n`/Esc no, arrows or Tab move the focus, Enter picks the
/// focused button.
pub struct ReplaceDialog {
    message: String,
    selected: usize,
    buttons: Buttons,
}

impl ReplaceDialog {
    pub const TITLE: &'static str = "Confirm Save As";

    pub fn new(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            message: format!("{name} already exists.\nDo you want to replace it?"),
            selected: 1,
            buttons: Buttons::new(&["Yes", "No"]),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Modal for ReplaceDialog {
    type Output = bool;

    fn handle_event(&mut self, event: &InputEvent) -> DialogStep<bool> {
        if let Some((x, y)) = left_click(event) {
            return match self.buttons.hit(x, y) {
                Some(idx) => DialogStep::Done(idx == 0),
                None => DialogStep::Continue,
            };
        }
        if matches!(event, InputEvent::CloseRequested) {
            return DialogStep::Done(false);
        }
        let Some(key) = pressed_key(event) else {
            return DialogStep::Continue;
        };

        match key.code {
            KeyCode::Char('y') => DialogStep::Done(true),
            KeyCode::Char('n') | KeyCode::Esc => DialogStep::Done(false),
            KeyCode::Enter => DialogStep::Done(self.selected == 0),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = 1 - self.selected;
                DialogStep::Continue
            }
            _ => DialogStep::Continue,
        }
    }

    fn abandon(&self) -> bool {
        false
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) -> Option<Position> {
        let text_width = self.message.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (text_width.max(Self::TITLE.width() as u16).max(24) + 6).min(area.width);
        let height = wrapped_height(&self.message, width.saturating_sub(4)) + 5;
        let popup = centered_rect(width, height, area);
        let inner = draw_frame(frame, popup, Self::TITLE, theme);
        if inner.height < 2 || inner.width < 4 {
            return None;
        }

        let body = Rect::new(inner.x + 1, inner.y + 1, inner.width - 2, inner.height - 2);
        frame.render_widget(
            Paragraph::new(self.message.as_str()).wrap(Wrap { trim: false }),
            body,
        );
        let buttons_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        self.buttons.render(frame, buttons_row, self.selected, theme);
        None
    }
}

// ==================== Path prompt ====================

/// Single-line path input with Tab completion.
///
/// Relative input resolves against `base`. Enter on an existing directory
/// descends into it instead of returning. Blank input, Esc and running out
/// of input all cancel.
pub struct PathPrompt {
    title: String,
    input: LineInput,
    base: PathBuf,
    filters: Vec<FileFilter>,
    candidates: Vec<String>,
    provider: LocalFileProvider,
}

impl PathPrompt {
    pub fn new(title: &str, initial: &str, filters: &[FileFilter]) -> Self {
        Self {
            title: title.to_string(),
            input: LineInput::new(initial),
            base: PathBuf::new(),
            filters: filters.to_vec(),
            candidates: Vec::new(),
            provider: LocalFileProvider::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = base.into();
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn complete(&mut self) {
        let completion = complete_path(
            self.input.value(),
            &self.base,
            &self.filters,
            &self.provider,
        );
        self.input.set(completion.value);
        self.candidates = completion.candidates;
    }

    /// Spaces are part of the name; only all-blank input counts as empty.
    fn accept(&mut self) -> DialogStep<Option<PathBuf>> {
        let value = self.input.value().to_string();
        if value.trim().is_empty() {
            return DialogStep::Done(None);
        }
        let path = self.base.join(&value);
        if self.provider.is_dir(&path) {
            if !(value.ends_with('/') || value.ends_with(std::path::MAIN_SEPARATOR)) {
                self.input.set(format!("{value}/"));
            }
            self.complete();
            return DialogStep::Continue;
        }
        DialogStep::Done(Some(path))
    }
}

impl Modal for PathPrompt {
    type Output = Option<PathBuf>;

    fn handle_event(&mut self, event: &InputEvent) -> DialogStep<Option<PathBuf>> {
        match event {
            InputEvent::Paste(text) => {
                if self.input.insert(text) {
                    self.candidates.clear();
                }
                return DialogStep::Continue;
            }
            InputEvent::CloseRequested => return DialogStep::Done(None),
            _ => {}
        }
        let Some(key) = pressed_key(event) else {
            return DialogStep::Continue;
        };

        if let Some(ch) = key.text_char() {
            let mut tmp = [0u8; 4];
            if self.input.insert(ch.encode_utf8(&mut tmp)) {
                self.candidates.clear();
            }
            return DialogStep::Continue;
        }

        let edited = match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => return self.accept(),
            (KeyCode::Esc, _) => return DialogStep::Done(None),
            (KeyCode::Tab, _) => {
                self.complete();
                false
            }
            (KeyCode::Backspace, _) => self.input.backspace(),
            (KeyCode::Delete, _) => self.input.delete(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.input.clear();
                true
            }
            (KeyCode::Left, _) => {
                self.input.left();
                false
            }
            (KeyCode::Right, _) => {
                self.input.right();
                false
            }
            (KeyCode::Home, _) => {
                self.input.home();
                false
            }
            (KeyCode::End, _) => {
                self.input.end();
                false
            }
            _ => false,
        };
        if edited {
            self.candidates.clear();
        }
        DialogStep::Continue
    }

    fn abandon(&self) -> Option<PathBuf> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) -> Option<Position> {
        let width = area.width.saturating_mul(70) / 100;
        let popup = centered_rect(width.max(40), 8, area);
        let inner = draw_frame(frame, popup, &self.title, theme);
        if inner.height < 5 || inner.width < 6 {
            return None;
        }

        let muted = Style::default().fg(theme.muted_fg);
        let x = inner.x + 1;
        let w = inner.width - 2;

        let filters = self
            .filters
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!("Files: {filters}"), muted))),
            Rect::new(x, inner.y, w, 1),
        );

        let input_row = Rect::new(x, inner.y + 2, w, 1);
        let (start, end) = self.input.window(w as usize);
        frame.render_widget(
            Paragraph::new(&self.input.value()[start..end]).style(
                Style::default()
                    .fg(theme.dialog_fg)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            input_row,
        );

        if !self.candidates.is_empty() {
            let list = self.candidates.join("  ");
            let cut = fit_width(&list, w as usize);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(&list[..cut], muted))),
                Rect::new(x, inner.y + 3, w, 1),
            );
        }

        let hint = Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.accent_fg)),
            Span::raw(" OK  "),
            Span::styled("[Tab]", Style::default().fg(theme.accent_fg)),
            Span::raw(" Complete  "),
            Span::styled("[Esc]", muted),
            Span::raw(" Cancel"),
        ]);
        frame.render_widget(
            Paragraph::new(hint),
            Rect::new(x, inner.y + inner.height - 1, w, 1),
        );

        let column = self.input.cursor_column(w as usize) as u16;
        Some(Position::new(input_row.x + column, input_row.y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/dialogs.rs"]
mod tests;
