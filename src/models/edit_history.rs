//! 编辑历史：线性 undo/redo 栈
//!
//! Consecutive typing and deletion runs are folded into one step. A new edit
//! after an undo drops the redo stack.

use super::edit_op::EditOp;

pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

pub struct EditHistory {
    undo: Vec<EditOp>,
    redo: Vec<EditOp>,
    limit: usize,
    /// Set by `seal` so the next edit starts a fresh step.
    sealed: bool,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
            sealed: false,
        }
    }

    pub fn push(&mut self, op: EditOp) {
        self.redo.clear();
        if !self.sealed {
            if let Some(last) = self.undo.last_mut() {
                if last.try_merge(&op) {
                    return;
                }
            }
        }
        self.sealed = false;
        self.undo.push(op);
        if self.undo.len() > self.limit {
            let overflow = self.undo.len() - self.limit;
            self.undo.drain(..overflow);
        }
    }

    /// Ends the current typing run (cursor jumps, clicks, undo/redo).
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn undo(&mut self) -> Option<EditOp> {
        let op = self.undo.pop()?;
        self.redo.push(op.clone());
        self.sealed = true;
        Some(op)
    }

    pub fn redo(&mut self) -> Option<EditOp> {
        let op = self.redo.pop()?;
        self.undo.push(op.clone());
        self.sealed = true;
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.sealed = false;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}
