use serde::{Deserialize, Serialize};

/// A documentation comment block found in one version of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    /// Untrimmed source lines of the block joined with `\n`.
    pub text: String,
    /// 1-based line holding the start marker.
    pub start_line: u32,
    /// 1-based line holding the end marker.
    pub end_line: u32,
}

impl DocBlock {
    /// Convenience constructor.
    pub fn new(text: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        Self {
            text: text.into(),
            start_line,
            end_line,
        }
    }
}

/// Role a run of lines plays in a line-level diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Lines present on both sides.
    Unchanged,
    /// Lines only present on the new side.
    Added,
    /// Lines only present on the old side.
    Removed,
}

/// Consecutive diff lines sharing the same [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// Whether the run was added, removed or kept.
    pub kind: ChangeKind,
    /// Raw text of the run, including line terminators.
    pub text: String,
}

impl LineChange {
    /// Create a new run.
    pub fn new(kind: ChangeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns `true` for added or removed runs.
    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }
}
