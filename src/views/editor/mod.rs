//! 编辑器视图：状态、视口与渲染

mod editor_view;
mod render;
mod viewport;

pub use editor_view::EditorView;
pub use render::{compute_editor_layout, render_editor, EditorLayout};
pub use viewport::Viewport;
