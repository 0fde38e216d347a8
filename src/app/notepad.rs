//! 主窗口：标题栏、菜单栏、编辑区与状态栏
//!
//! Owns the document controller (with the editor view as its surface and the
//! terminal host as its file store), the key map and the menu bar. Keys and
//! menu items both turn into a [`Command`] and go through [`Notepad::execute`].

use super::host::TerminalHost;
use super::menu::{MenuBar, MenuOutcome};
use super::theme::UiTheme;
use crate::core::event::{InputEvent, Key};
use crate::core::Command;
use crate::kernel::services::adapters::KeybindingService;
use crate::kernel::services::ports::EditorConfig;
use crate::kernel::status::{StatusLine, StatusStyle};
use crate::kernel::{DocumentController, DocumentOptions};
use crate::tui::EventSource;
use crate::views::{render_editor, EditorView};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::io;
use std::path::Path;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const TITLE_HEIGHT: u16 = 1;
const MENU_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

pub type Document<B, E> = DocumentController<EditorView, TerminalHost<B, E>>;

pub struct Notepad<B: Backend, E: EventSource> {
    document: Document<B, E>,
    keybindings: KeybindingService,
    menu: MenuBar,
}

impl<B: Backend, E: EventSource> Notepad<B, E> {
    pub fn new(
        host: TerminalHost<B, E>,
        keybindings: KeybindingService,
        config: &EditorConfig,
    ) -> Self {
        let view = EditorView::with_config(config);
        let options = DocumentOptions::from(config);
        Self {
            document: DocumentController::with_options(view, host, options),
            keybindings,
            menu: MenuBar::new(),
        }
    }

    pub fn document(&self) -> &Document<B, E> {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document<B, E> {
        &mut self.document
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    /// Loads the file named on the command line through the regular open
    /// path, so a failure shows the same error dialog.
    pub fn open_startup(&mut self, path: &Path) -> bool {
        tracing::info!(path = %path.display(), "startup file");
        self.document.open_path(path)
    }

    /// Runs until an exit is confirmed or the input ends. Other input errors
    /// are returned.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.render()?;
            if self.document.should_exit() {
                return Ok(());
            }

            match self.document.store_mut().next_event() {
                Ok(Some(event)) => self.handle_event(&event),
                Ok(None) => {}
                Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!("input closed");
                    return Ok(());
                }
                Err(error) => return Err(error),
            }
            self.document.store_mut().tick(Instant::now());
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::CloseRequested => {
                tracing::info!("close requested");
                self.execute(Command::Quit);
            }
            InputEvent::Paste(text) => {
                if !self.menu.is_open() {
                    self.document.edit(|view| view.paste(text));
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Key(_) => {
                if let Some(key_event) = event.as_key_press() {
                    self.handle_key(Key::from(*key_event));
                }
            }
            InputEvent::Resize(_, _) | InputEvent::FocusGained | InputEvent::FocusLost => {}
        }
    }

    fn handle_key(&mut self, key: Key) {
        match self.menu.handle_key(&key) {
            MenuOutcome::Activate(command) => return self.execute(command),
            MenuOutcome::Consumed => return,
            MenuOutcome::Ignored => {}
        }

        if let Some(command) = self.keybindings.resolve(&key).cloned() {
            self.execute(command);
        } else if let Some(ch) = key.text_char() {
            self.execute(Command::InsertChar(ch));
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match self.menu.handle_mouse(mouse) {
            MenuOutcome::Activate(command) => return self.execute(command),
            MenuOutcome::Consumed => return,
            MenuOutcome::Ignored => {}
        }

        let view = self.document.surface_mut();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(area) = view.content_area() else {
                    return;
                };
                if contains(area, mouse.column, mouse.row) {
                    view.click(mouse.column - area.x, mouse.row - area.y);
                }
            }
            MouseEventKind::ScrollUp => {
                let step = view.scroll_step() as isize;
                view.scroll_by(-step);
            }
            MouseEventKind::ScrollDown => {
                let step = view.scroll_step() as isize;
                view.scroll_by(step);
            }
            _ => {}
        }
    }

    pub fn execute(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "execute");
        match command {
            Command::NewFile
            | Command::OpenFile
            | Command::Save
            | Command::SaveAs
            | Command::Quit => {
                self.menu.close();
                // Dialogs draw over the last frame; make it current first.
                if let Err(error) = self.render() {
                    tracing::warn!(error = %error, "redraw before dialog failed");
                }
                match command {
                    Command::NewFile => {
                        self.document.request_new();
                    }
                    Command::OpenFile => {
                        self.document.request_open();
                    }
                    Command::Save => self.document.save(),
                    Command::SaveAs => self.document.save_as(),
                    _ => {
                        self.document.request_exit();
                    }
                }
            }
            Command::OpenMenu => self.menu.toggle(),
            Command::Escape => self.menu.close(),
            edit => {
                self.document.edit(|view| view.apply(&edit));
            }
        }
    }

    pub fn render(&mut self) -> io::Result<()> {
        let Self {
            document,
            keybindings,
            menu,
        } = self;
        let title = document.title();
        let (view, host) = document.parts_mut();
        host.draw(|frame, theme, status| {
            let area = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(TITLE_HEIGHT),
                    Constraint::Length(MENU_HEIGHT),
                    Constraint::Min(0),
                    Constraint::Length(STATUS_HEIGHT),
                ])
                .split(area);

            render_title(frame, chunks[0], &title, theme);
            menu.render_bar(frame, chunks[1], theme);
            let cursor = render_editor(frame, chunks[2], view, theme);
            render_status(frame, chunks[3], status, view.cursor(), theme);
            menu.render_popup(frame, area, theme, keybindings);

            if let (Some(position), false) = (cursor, menu.is_open()) {
                frame.set_cursor_position(position);
            }
        })
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn render_title(frame: &mut Frame, area: Rect, title: &str, theme: &UiTheme) {
    let style = Style::default()
        .fg(theme.title_fg)
        .bg(theme.title_bg)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(format!(" {title}")).style(style), area);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    status: &StatusLine,
    (row, col): (usize, usize),
    theme: &UiTheme,
) {
    let base = Style::default().fg(theme.status_fg).bg(theme.status_bg);
    let message_style = match status.style() {
        StatusStyle::Normal => base,
        StatusStyle::Success => base.fg(theme.success_fg).add_modifier(Modifier::BOLD),
        StatusStyle::Error => base.fg(theme.error_fg).add_modifier(Modifier::BOLD),
    };

    let position = format!("Ln {}, Col {} ", row + 1, col + 1);
    let message = format!(" {}", status.message());
    let gap = (area.width as usize).saturating_sub(message.width() + position.width());
    let line = Line::from(vec![
        Span::styled(message, message_style),
        Span::styled(" ".repeat(gap), base),
        Span::styled(position, base),
    ]);
    frame.render_widget(Paragraph::new(line).style(base), area);
}

#[cfg(test)]
#[path = "../../tests/unit/app/notepad.rs"]
mod tests;
