//! 原子编辑操作：可逆的插入/删除

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpKind {
    Insert {
        char_offset: usize,
        text: String,
    },
    Delete {
        start: usize,
        end: usize,
        deleted: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOp {
    pub kind: OpKind,
    pub cursor_before: (usize, usize),
    pub cursor_after: (usize, usize),
}

impl EditOp {
    pub fn insert(
        char_offset: usize,
        text: String,
        cursor_before: (usize, usize),
        cursor_after: (usize, usize),
    ) -> Self {
        Self {
            kind: OpKind::Insert { char_offset, text },
            cursor_before,
            cursor_after,
        }
    }

    pub fn delete(
        start: usize,
        end: usize,
        deleted: String,
        cursor_before: (usize, usize),
        cursor_after: (usize, usize),
    ) -> Self {
        Self {
            kind: OpKind::Delete {
                start,
                end,
                deleted,
            },
            cursor_before,
            cursor_after,
        }
    }

    pub fn inverse(&self) -> OpKind {
        match &self.kind {
            OpKind::Insert { char_offset, text } => OpKind::Delete {
                start: *char_offset,
                end: char_offset + text.chars().count(),
                deleted: text.clone(),
            },
            OpKind::Delete { start, deleted, .. } => OpKind::Insert {
                char_offset: *start,
                text: deleted.clone(),
            },
        }
    }

    pub fn cursor_after(&self) -> (usize, usize) {
        self.cursor_after
    }

    pub fn cursor_before(&self) -> (usize, usize) {
        self.cursor_before
    }

    /// Folds `next` into `self` when both belong to one typing run: adjacent
    /// single-line inserts within a word, or consecutive backspaces/deletes.
    pub fn try_merge(&mut self, next: &EditOp) -> bool {
        let merged = match (&mut self.kind, &next.kind) {
            (
                OpKind::Insert { char_offset, text },
                OpKind::Insert {
                    char_offset: next_offset,
                    text: next_text,
                },
            ) => {
                let contiguous = *char_offset + text.chars().count() == *next_offset;
                let breaks_word = text.ends_with(char::is_whitespace)
                    && !next_text.starts_with(char::is_whitespace);
                if contiguous && !next_text.contains('\n') && !text.contains('\n') && !breaks_word {
                    text.push_str(next_text);
                    true
                } else {
                    false
                }
            }
            (
                OpKind::Delete {
                    start,
                    end,
                    deleted,
                },
                OpKind::Delete {
                    start: next_start,
                    end: next_end,
                    deleted: next_deleted,
                },
            ) => {
                if *next_end == *start {
                    // Backspace run.
                    *start = *next_start;
                    deleted.insert_str(0, next_deleted);
                    true
                } else if *next_start == *start {
                    // Forward-delete run.
                    *end += next_end - next_start;
                    deleted.push_str(next_deleted);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if merged {
            self.cursor_after = next.cursor_after;
        }
        merged
    }
}

impl OpKind {
    pub fn apply(&self, rope: &mut ropey::Rope) {
        match self {
            OpKind::Insert { char_offset, text } => {
                rope.insert(*char_offset, text);
            }
            OpKind::Delete { start, end, .. } => {
                rope.remove(*start..*end);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_op.rs"]
mod tests;
