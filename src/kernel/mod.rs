//! Headless document core: owns `path`/`dirty` and gates destructive operations.

pub mod document;
pub mod services;
pub mod status;
pub mod surface;

pub use document::{ConfirmState, DocumentController, DocumentOptions, DocumentState, Verdict};
pub use status::{RevertTimer, StatusLine, StatusStyle, TimerHandle, DEFAULT_STATUS};
pub use surface::TextSurface;
