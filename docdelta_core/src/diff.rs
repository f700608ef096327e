//! Line-level diffing of documentation block text.

use git2::{DiffOptions, Patch};

use crate::{ChangeKind, LineChange, Result};

/// Entry point for line diffs, backed by libgit2's text diff.
#[derive(Debug, Default)]
pub struct DiffEngine;

impl DiffEngine {
    /// Construct a new diff engine instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Diff `old` against `new` line by line.
    ///
    /// Consecutive lines with the same origin are grouped into one
    /// [`LineChange`]. The whole text is kept as context, so unchanged runs
    /// appear between the changes.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 failures while building or walking the patch.
    pub fn diff_lines(&self, old: &str, new: &str) -> Result<Vec<LineChange>> {
        if old == new {
            return Ok(if old.is_empty() {
                Vec::new()
            } else {
                vec![LineChange::new(ChangeKind::Unchanged, old)]
            });
        }

        let context = old.lines().count().max(new.lines().count());
        let mut opts = DiffOptions::new();
        opts.context_lines(u32::try_from(context).unwrap_or(u32::MAX));

        let patch =
            Patch::from_buffers(old.as_bytes(), None, new.as_bytes(), None, Some(&mut opts))?;

        let mut runs: Vec<LineChange> = Vec::new();
        for hunk in 0..patch.num_hunks() {
            let mut hunk_start = true;
            for index in 0..patch.num_lines_in_hunk(hunk)? {
                let line = patch.line_in_hunk(hunk, index)?;
                let kind = match line.origin() {
                    '+' => ChangeKind::Added,
                    '-' => ChangeKind::Removed,
                    ' ' => ChangeKind::Unchanged,
                    // end-of-file newline markers
                    _ => continue,
                };
                let text = String::from_utf8_lossy(line.content());

                let continues_run =
                    !hunk_start && runs.last().is_some_and(|run| run.kind == kind);
                match runs.last_mut() {
                    Some(run) if continues_run => run.text.push_str(&text),
                    _ => runs.push(LineChange::new(kind, text)),
                }
                hunk_start = false;
            }
        }

        Ok(runs)
    }
}
