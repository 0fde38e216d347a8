//! 视图层模块

pub mod editor;

pub use editor::{compute_editor_layout, render_editor, EditorLayout, EditorView, Viewport};
