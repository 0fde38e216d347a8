//! 数据模型层

pub mod edit_history;
pub mod edit_op;
pub mod text_buffer;

pub use edit_history::EditHistory;
pub use edit_op::{EditOp, OpKind};
pub use text_buffer::{slice_to_cow, TextBuffer};
