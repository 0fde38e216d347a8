//! Document lifecycle: `path`/`dirty` bookkeeping and the save/discard/cancel
//! gate run before anything that would throw away the current text.

use super::services::ports::{
    with_default_extension, Choice, EditorConfig, FileStore, TEXT_FILE_FILTERS,
};
use super::status::StatusStyle;
use super::surface::TextSurface;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_TITLE: &str = "BlockEdit";

const SAVED_MESSAGE: &str = "Saved";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    /// `None` means untitled, never saved.
    pub path: Option<PathBuf>,
    /// True iff the text was edited since the last successful load or save.
    pub dirty: bool,
}

/// Steps of the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    NotNeeded,
    Ask,
    Saving,
    Proceed,
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Abort,
}

impl Verdict {
    pub fn is_proceed(self) -> bool {
        matches!(self, Verdict::Proceed)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub status_duration: Duration,
    pub default_extension: String,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for DocumentOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            status_duration: config.status_duration(),
            default_extension: config.default_extension.clone(),
        }
    }
}

#[derive(Clone, Copy)]
struct Prompt {
    title: &'static str,
    message: &'static str,
}

const NEW_PROMPT: Prompt = Prompt {
    title: "BlockEdit - New file",
    message: "Save changes before creating a new file?",
};

const OPEN_PROMPT: Prompt = Prompt {
    title: "BlockEdit - Open file",
    message: "Save changes before opening another file?",
};

const EXIT_PROMPT: Prompt = Prompt {
    title: "BlockEdit - Exit",
    message: "Save changes before closing?",
};

pub struct DocumentController<S, F> {
    surface: S,
    store: F,
    state: DocumentState,
    options: DocumentOptions,
    exit_requested: bool,
}

impl<S: TextSurface, F: FileStore> DocumentController<S, F> {
    pub fn new(surface: S, store: F) -> Self {
        Self::with_options(surface, store, DocumentOptions::default())
    }

    pub fn with_options(surface: S, store: F, options: DocumentOptions) -> Self {
        Self {
            surface,
            store,
            state: DocumentState::default(),
            options,
            exit_requested: false,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn path(&self) -> Option<&Path> {
        self.state.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    /// Set once `request_exit` got past the gate; the host should terminate.
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for non-mutating interaction (cursor, scrolling).
    /// Content edits go through [`Self::edit`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &F {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut F {
        &mut self.store
    }

    pub fn parts_mut(&mut self) -> (&mut S, &mut F) {
        (&mut self.surface, &mut self.store)
    }

    pub fn title(&self) -> String {
        let mut title = APP_TITLE.to_string();
        if let Some(path) = &self.state.path {
            title.push_str(" - ");
            title.push_str(&path.display().to_string());
        }
        if self.state.dirty {
            title.push_str(" *");
        }
        title
    }

    /// Runs a user edit against the surface. `edit` reports whether the text
    /// changed; a change marks the document dirty.
    pub fn edit(&mut self, edit: impl FnOnce(&mut S) -> bool) -> bool {
        let changed = edit(&mut self.surface);
        if changed {
            self.on_content_changed();
        }
        changed
    }

    pub fn on_content_changed(&mut self) {
        if !self.state.dirty {
            tracing::debug!("document became dirty");
        }
        self.state.dirty = true;
    }

    pub fn request_new(&mut self) -> Verdict {
        let verdict = self.confirm(NEW_PROMPT);
        if verdict.is_proceed() {
            self.surface.clear();
            self.state = DocumentState::default();
            tracing::info!("new document");
        }
        verdict
    }

    /// The returned verdict is the gate's; a cancelled picker or failed read
    /// after `Proceed` still leaves the document untouched.
    pub fn request_open(&mut self) -> Verdict {
        let verdict = self.confirm(OPEN_PROMPT);
        if !verdict.is_proceed() {
            return verdict;
        }
        let Some(path) = self.store.choose_open_path(TEXT_FILE_FILTERS) else {
            tracing::debug!("open cancelled");
            return verdict;
        };
        self.open_path(&path);
        verdict
    }

    /// Loads `path` without running the gate. Used by `request_open` and
    /// for the file named on the command line.
    pub fn open_path(&mut self, path: &Path) -> bool {
        match self.store.read_text(path) {
            Ok(text) => {
                self.surface.set_full_text(&text);
                self.state.path = Some(path.to_path_buf());
                self.state.dirty = false;
                tracing::info!(path = %path.display(), chars = text.chars().count(), "opened");
                true
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "open failed");
                self.store.show_error(
                    "Open failed",
                    &format!("Could not open the file:\n{}", error),
                );
                false
            }
        }
    }

    pub fn save(&mut self) {
        match self.state.path.clone() {
            Some(path) => {
                self.write_to(&path, "Could not save the file");
            }
            None => self.save_as(),
        }
    }

    pub fn save_as(&mut self) {
        let default_ext = self.options.default_extension.clone();
        let Some(path) = self.store.choose_save_path(TEXT_FILE_FILTERS, &default_ext) else {
            tracing::debug!("save as cancelled");
            return;
        };
        let path = with_default_extension(path, &default_ext);
        if self.write_to(&path, "Could not create the file") {
            self.state.path = Some(path);
        }
    }

    pub fn request_exit(&mut self) -> Verdict {
        let verdict = self.confirm(EXIT_PROMPT);
        if verdict.is_proceed() {
            tracing::info!("exit confirmed");
            self.exit_requested = true;
        }
        verdict
    }

    fn write_to(&mut self, path: &Path, failure: &str) -> bool {
        let text = self.surface.full_text();
        match self.store.write_text(path, &text) {
            Ok(()) => {
                self.state.dirty = false;
                tracing::info!(path = %path.display(), bytes = text.len(), "saved");
                self.store.show_status(
                    SAVED_MESSAGE,
                    StatusStyle::Success,
                    self.options.status_duration,
                );
                true
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "save failed");
                self.store
                    .show_error("Save failed", &format!("{}:\n{}", failure, error));
                false
            }
        }
    }

    /// The one gate shared by new/open/exit. A failed save and a cancelled
    /// save-as picker both leave the document dirty and therefore abort.
    fn confirm(&mut self, prompt: Prompt) -> Verdict {
        let mut state = if self.state.dirty {
            ConfirmState::Ask
        } else {
            ConfirmState::NotNeeded
        };

        loop {
            tracing::debug!(?state, title = prompt.title, "confirm");
            state = match state {
                ConfirmState::NotNeeded => ConfirmState::Proceed,
                ConfirmState::Ask => match self.store.confirm_three_way(prompt.title, prompt.message)
                {
                    Choice::Save => ConfirmState::Saving,
                    Choice::Discard => ConfirmState::Proceed,
                    Choice::Cancel => ConfirmState::Abort,
                },
                ConfirmState::Saving => {
                    self.save();
                    if self.state.dirty {
                        ConfirmState::Abort
                    } else {
                        ConfirmState::Proceed
                    }
                }
                ConfirmState::Proceed => return Verdict::Proceed,
                ConfirmState::Abort => return Verdict::Abort,
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
