//! Terminal implementation of the file store.
//!
//! Dialog methods block: each runs its own event loop over a snapshot of the
//! last frame the app drew, and returns once the user answers. The status
//! line and its revert timer live here as well, so the deadline keeps being
//! polled while a dialog is up.

use super::dialogs::{
    ConfirmDialog, DialogStep, MessageDialog, Modal, PathPrompt, ReplaceDialog,
};
use super::theme::UiTheme;
use crate::core::event::InputEvent;
use crate::kernel::services::adapters::LocalFileProvider;
use crate::kernel::services::ports::{
    with_default_extension, Choice, FileFilter, FileResult, FileStore,
};
use crate::kernel::status::{StatusLine, StatusStyle};
use crate::tui::EventSource;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Upper bound on a single wait for input when no revert is pending.
pub const IDLE_POLL: Duration = Duration::from_millis(500);

pub struct TerminalHost<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
    theme: UiTheme,
    status: StatusLine,
    files: LocalFileProvider,
    start_dir: PathBuf,
    backdrop: Option<Buffer>,
}

impl<B: Backend, E: EventSource> TerminalHost<B, E> {
    pub fn new(terminal: Terminal<B>, events: E, theme: UiTheme) -> Self {
        let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            terminal,
            events,
            theme,
            status: StatusLine::new(),
            files: LocalFileProvider::new(),
            start_dir,
            backdrop: None,
        }
    }

    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = dir.into();
        self
    }

    pub fn theme(&self) -> &UiTheme {
        &self.theme
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Draws a frame and keeps it as the backdrop for later dialogs.
    pub fn draw(
        &mut self,
        render: impl FnOnce(&mut Frame, &UiTheme, &StatusLine),
    ) -> io::Result<()> {
        let Self {
            terminal,
            theme,
            status,
            backdrop,
            ..
        } = self;
        let completed = terminal.draw(|frame| render(frame, theme, status))?;
        *backdrop = Some(completed.buffer.clone());
        Ok(())
    }

    /// How long the loop may wait for input before the status needs a tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.status.revert_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    pub fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        let timeout = self.poll_timeout(Instant::now());
        self.events.next_event(timeout)
    }

    /// Returns true when the status line changed and needs a redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.status.tick(now);
        if changed {
            tracing::debug!("status reverted");
        }
        changed
    }

    fn run_modal<M: Modal>(&mut self, modal: &mut M) -> M::Output {
        loop {
            if let Err(error) = self.draw_modal(modal) {
                tracing::warn!(error = %error, "dialog draw failed");
                return modal.abandon();
            }
            match self.next_event() {
                Ok(Some(InputEvent::Resize(_, _))) => {
                    // The snapshot no longer matches the screen.
                    self.backdrop = None;
                }
                Ok(Some(event)) => {
                    if let DialogStep::Done(output) = modal.handle_event(&event) {
                        return output;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    if error.kind() != io::ErrorKind::UnexpectedEof {
                        tracing::warn!(error = %error, "dialog input failed");
                    }
                    return modal.abandon();
                }
            }
            self.tick(Instant::now());
        }
    }

    fn draw_modal<M: Modal>(&mut self, modal: &mut M) -> io::Result<()> {
        let Self {
            terminal,
            theme,
            backdrop,
            ..
        } = self;
        terminal.draw(|frame| {
            let area = frame.area();
            if let Some(snapshot) = backdrop.as_ref() {
                let shared = area.intersection(snapshot.area);
                let buf = frame.buffer_mut();
                for y in shared.top()..shared.bottom() {
                    for x in shared.left()..shared.right() {
                        buf[(x, y)] = snapshot[(x, y)].clone();
                    }
                }
            }
            if let Some(position) = modal.render(frame, area, theme) {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }

    fn prompt_initial(&self) -> String {
        let dir = self.start_dir.display().to_string();
        if dir.ends_with('/') || dir.ends_with(std::path::MAIN_SEPARATOR) {
            dir
        } else {
            format!("{dir}/")
        }
    }

    fn remember_dir(&mut self, path: &Path) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.start_dir = parent.to_path_buf();
        }
    }

    fn path_prompt(&self, title: &str, filters: &[FileFilter]) -> PathPrompt {
        PathPrompt::new(title, &self.prompt_initial(), filters).with_base(self.start_dir.clone())
    }
}

impl<B: Backend, E: EventSource> FileStore for TerminalHost<B, E> {
    fn choose_open_path(&mut self, filters: &[FileFilter]) -> Option<PathBuf> {
        let mut prompt = self.path_prompt("Open file", filters);
        let chosen = self.run_modal(&mut prompt)?;
        self.remember_dir(&chosen);
        Some(chosen)
    }

    /// Declining to replace an existing file goes back to the same prompt.
    fn choose_save_path(&mut self, filters: &[FileFilter], default_ext: &str) -> Option<PathBuf> {
        let title = format!("Save file as (default .{})", default_ext.trim_start_matches('.'));
        let mut prompt = self.path_prompt(&title, filters);
        loop {
            let chosen = self.run_modal(&mut prompt)?;
            let target = with_default_extension(chosen.clone(), default_ext);
            if self.files.is_file(&target) {
                let replace = self.run_modal(&mut ReplaceDialog::new(&target));
                tracing::debug!(path = %target.display(), replace, "replace answered");
                if !replace {
                    continue;
                }
            }
            self.remember_dir(&chosen);
            return Some(chosen);
        }
    }

    fn read_text(&mut self, path: &Path) -> FileResult<String> {
        self.files.read_text(path)
    }

    fn write_text(&mut self, path: &Path, text: &str) -> FileResult<()> {
        self.files.write_text(path, text)
    }

    fn confirm_three_way(&mut self, title: &str, message: &str) -> Choice {
        let choice = self.run_modal(&mut ConfirmDialog::new(title, message));
        tracing::debug!(?choice, title, "confirm answered");
        choice
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.run_modal(&mut MessageDialog::new(title, message));
    }

    fn show_status(&mut self, message: &str, style: StatusStyle, duration: Duration) {
        self.status.show(message, style, duration);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/host.rs"]
mod tests;
