//! Menu bar with a single "File" drop-down.
//!
//! The bar owns only open/closed state and the selection. Items resolve to
//! the same [`Command`] values as key bindings, so activation goes through
//! the app's one dispatcher.

use super::theme::UiTheme;
use crate::core::event::Key;
use crate::core::Command;
use crate::kernel::services::adapters::{format_key, KeybindingService};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        mnemonic: char,
        command: Command,
    },
    Separator,
}

impl MenuEntry {
    fn is_item(&self) -> bool {
        matches!(self, MenuEntry::Item { .. })
    }
}

pub const FILE_MENU_TITLE: &str = "File";

pub const FILE_MENU: &[MenuEntry] = &[
    MenuEntry::Item {
        label: "New",
        mnemonic: 'n',
        command: Command::NewFile,
    },
    MenuEntry::Item {
        label: "Open...",
        mnemonic: 'o',
        command: Command::OpenFile,
    },
    MenuEntry::Item {
        label: "Save",
        mnemonic: 's',
        command: Command::Save,
    },
    MenuEntry::Item {
        label: "Save As...",
        mnemonic: 'a',
        command: Command::SaveAs,
    },
    MenuEntry::Separator,
    MenuEntry::Item {
        label: "Exit",
        mnemonic: 'x',
        command: Command::Quit,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The menu had no use for the event.
    Ignored,
    Consumed,
    /// An item was chosen; the menu has already closed.
    Activate(Command),
}

#[derive(Debug, Default)]
pub struct MenuBar {
    open: bool,
    selected: usize,
    title_area: Rect,
    popup_area: Option<Rect>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self) {
        self.open = true;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.popup_area = None;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    fn step(&mut self, forward: bool) {
        let len = FILE_MENU.len();
        let mut idx = self.selected;
        for _ in 0..len {
            idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if FILE_MENU[idx].is_item() {
                self.selected = idx;
                return;
            }
        }
    }

    fn activate(&mut self, idx: usize) -> MenuOutcome {
        match FILE_MENU.get(idx) {
            Some(MenuEntry::Item { command, .. }) => {
                self.close();
                MenuOutcome::Activate(command.clone())
            }
            _ => MenuOutcome::Consumed,
        }
    }

    /// Keys are only taken while the menu is open; opening it is a regular
    /// key binding.
    pub fn handle_key(&mut self, key: &Key) -> MenuOutcome {
        if !self.open {
            return MenuOutcome::Ignored;
        }

        match key.code {
            KeyCode::Up => self.step(false),
            KeyCode::Down | KeyCode::Tab => self.step(true),
            KeyCode::Home => {
                self.selected = 0;
            }
            KeyCode::Enter => return self.activate(self.selected),
            KeyCode::Esc | KeyCode::F(10) => self.close(),
            KeyCode::Char('f') if key.modifiers == KeyModifiers::ALT => self.close(),
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL) => {
                let hit = FILE_MENU.iter().position(|entry| {
                    matches!(entry, MenuEntry::Item { mnemonic, .. } if *mnemonic == ch.to_ascii_lowercase())
                });
                if let Some(idx) = hit {
                    return self.activate(idx);
                }
            }
            _ => {}
        }
        MenuOutcome::Consumed
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> MenuOutcome {
        let (x, y) = (mouse.column, mouse.row);
        let on_title = contains(self.title_area, x, y);

        if !self.open {
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if on_title => {
                    self.open();
                    MenuOutcome::Consumed
                }
                _ => MenuOutcome::Ignored,
            };
        }

        let item = self.item_at(x, y);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if on_title {
                    self.close();
                    MenuOutcome::Consumed
                } else if let Some(idx) = item {
                    self.activate(idx)
                } else if self.popup_area.is_some_and(|a| contains(a, x, y)) {
                    MenuOutcome::Consumed
                } else {
                    self.close();
                    MenuOutcome::Consumed
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some(idx) = item {
                    if FILE_MENU[idx].is_item() {
                        self.selected = idx;
                    }
                }
                MenuOutcome::Consumed
            }
            _ => MenuOutcome::Consumed,
        }
    }

    fn item_at(&self, x: u16, y: u16) -> Option<usize> {
        let popup = self.popup_area?;
        let inner = Rect::new(
            popup.x + 1,
            popup.y + 1,
            popup.width.saturating_sub(2),
            popup.height.saturating_sub(2),
        );
        if !contains(inner, x, y) {
            return None;
        }
        let idx = (y - inner.y) as usize;
        (idx < FILE_MENU.len()).then_some(idx)
    }

    /// Draws the one-row bar.
    pub fn render_bar(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let base = Style::default().fg(theme.menu_fg).bg(theme.menu_bg);
        let title = format!(" {FILE_MENU_TITLE} ");
        self.title_area = Rect::new(area.x, area.y, (title.width() as u16).min(area.width), 1);

        let title_style = if self.open {
            Style::default()
                .fg(theme.menu_selected_fg)
                .bg(theme.menu_selected_bg)
        } else {
            base
        };
        let line = Line::from(vec![
            Span::styled(" ", title_style),
            Span::styled(
                FILE_MENU_TITLE[..1].to_string(),
                title_style.add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(format!("{} ", &FILE_MENU_TITLE[1..]), title_style),
        ]);
        frame.render_widget(Paragraph::new(line).style(base), area);
    }

    /// Draws the drop-down below the bar when open. `screen` bounds the popup.
    pub fn render_popup(
        &mut self,
        frame: &mut Frame,
        screen: Rect,
        theme: &UiTheme,
        keybindings: &KeybindingService,
    ) {
        if !self.open {
            self.popup_area = None;
            return;
        }

        let rows: Vec<(String, String)> = FILE_MENU
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item { label, command, .. } => (
                    label.to_string(),
                    keybindings
                        .key_for(command)
                        .map(|k| format_key(&k))
                        .unwrap_or_default(),
                ),
                MenuEntry::Separator => (String::new(), String::new()),
            })
            .collect();

        let label_w = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
        let key_w = rows.iter().map(|(_, k)| k.width()).max().unwrap_or(0);
        let inner_w = label_w + key_w + 6;

        let width = (inner_w as u16 + 2).min(screen.width);
        let height = (FILE_MENU.len() as u16 + 2).min(screen.height.saturating_sub(1));
        let y = self.title_area.y + 1;
        if height < 3 || y + height > screen.y + screen.height {
            self.popup_area = None;
            return;
        }
        let x = self.title_area.x.min((screen.x + screen.width).saturating_sub(width));
        let popup = Rect::new(x, y, width, height);
        self.popup_area = Some(popup);

        let base = Style::default().fg(theme.menu_fg).bg(theme.menu_bg);
        let selected = Style::default()
            .fg(theme.menu_selected_fg)
            .bg(theme.menu_selected_bg);
        let muted = base.fg(theme.muted_fg);

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(base)
            .style(base);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        for (idx, (entry, (label, key))) in FILE_MENU.iter().zip(rows.iter()).enumerate() {
            let row_y = inner.y + idx as u16;
            if row_y >= inner.y + inner.height {
                break;
            }
            let row = Rect::new(inner.x, row_y, inner.width, 1);
            let line = match entry {
                MenuEntry::Separator => Line::from(Span::styled(
                    "─".repeat(inner.width as usize),
                    muted,
                )),
                MenuEntry::Item { .. } => {
                    let style = if idx == self.selected { selected } else { base };
                    let prefix = if idx == self.selected { "▸ " } else { "  " };
                    let gap = label_w - label.width() + 2;
                    let text = format!("{prefix}{label}{}{key:>key_w$}  ", " ".repeat(gap));
                    Line::from(Span::styled(text, style))
                }
            };
            frame.render_widget(Paragraph::new(line), row);
        }
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

#[cfg(test)]
#[path = "../../tests/unit/app/menu.rs"]
mod tests;
