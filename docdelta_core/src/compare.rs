//! Positional pairing of old and new documentation blocks.

use crate::diff::DiffEngine;
use crate::{ChangeKind, ChangeRecord, DocBlock, Result, NOT_APPLICABLE};

/// Turns two block sequences of one file into change records.
///
/// The Nth old block is only ever compared with the Nth new block, so a
/// block inserted ahead of existing ones shifts every later pairing.
#[derive(Debug, Default)]
pub struct BlockDiffer {
    engine: DiffEngine,
}

impl BlockDiffer {
    /// Create a differ with a fresh diff engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `old` and `new` blocks of `file`.
    ///
    /// Records for paired and removed blocks come first in index order,
    /// followed by records for blocks that only exist in `new`. Every record
    /// produced for a paired block is anchored to the old block's start line.
    ///
    /// # Errors
    ///
    /// Propagates failures from the line diff.
    pub fn compare(
        &self,
        file: &str,
        old: &[DocBlock],
        new: &[DocBlock],
    ) -> Result<Vec<ChangeRecord>> {
        let mut records = Vec::new();

        for (index, old_block) in old.iter().enumerate() {
            match new.get(index) {
                Some(new_block) => self.compare_pair(file, old_block, new_block, &mut records)?,
                None => records.push(ChangeRecord::removed(
                    file,
                    old_block.start_line,
                    old_block.text.trim(),
                )),
            }
        }

        for new_block in new.iter().skip(old.len()) {
            records.push(ChangeRecord::added(
                file,
                new_block.start_line,
                new_block.text.trim(),
            ));
        }

        Ok(records)
    }

    fn compare_pair(
        &self,
        file: &str,
        old: &DocBlock,
        new: &DocBlock,
        records: &mut Vec<ChangeRecord>,
    ) -> Result<()> {
        let runs = self.engine.diff_lines(&old.text, &new.text)?;
        let mut pending_removal: Option<String> = None;

        for run in runs {
            match run.kind {
                ChangeKind::Removed => {
                    if let Some(removed) = pending_removal.replace(run.text.trim().to_owned()) {
                        records.push(ChangeRecord::removed(file, old.start_line, removed));
                    }
                }
                ChangeKind::Added => {
                    let old_text = pending_removal
                        .take()
                        .unwrap_or_else(|| NOT_APPLICABLE.to_owned());
                    records.push(ChangeRecord::modified(
                        file,
                        old.start_line,
                        old_text,
                        run.text.trim(),
                    ));
                }
                ChangeKind::Unchanged => {
                    if let Some(removed) = pending_removal.take() {
                        records.push(ChangeRecord::removed(file, old.start_line, removed));
                    }
                }
            }
        }

        if let Some(removed) = pending_removal {
            records.push(ChangeRecord::removed(file, old.start_line, removed));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::BlockExtractor;
    use crate::LineAnchor;

    const FILE: &str = "src/sample.js";

    fn blocks(content: &str) -> Vec<DocBlock> {
        BlockExtractor::default().extract(content, FILE)
    }

    fn compare(old: &str, new: &str) -> Vec<ChangeRecord> {
        BlockDiffer::new()
            .compare(FILE, &blocks(old), &blocks(new))
            .expect("compare blocks")
    }

    #[test]
    fn replaced_single_line_block_is_one_record() {
        let records = compare("/** a */\nfunction f(){}\n", "/** b */\nfunction f(){}\n");
        assert_eq!(
            records,
            vec![ChangeRecord::modified(FILE, 1, "/** a */", "/** b */")]
        );
    }

    #[test]
    fn identical_blocks_produce_nothing() {
        let content = "/**\n * Adds.\n */\nfunction add(){}\n";
        assert!(compare(content, content).is_empty());
    }

    #[test]
    fn block_removed_entirely() {
        let old = "/**\n   * Gone soon.\n   */\nfunction f(){}\n";
        let records = compare(old, "function f(){}\n");
        assert_eq!(
            records,
            vec![ChangeRecord::removed(FILE, 1, "/**\n   * Gone soon.\n   */")]
        );
    }

    #[test]
    fn extra_new_blocks_are_pure_additions() {
        let old = "/** one */\nfunction a(){}\n";
        let new = "/** one */\nfunction a(){}\n/** two */\nfunction b(){}\n/** three */\n";
        let records = compare(old, new);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(ChangeRecord::is_addition));
        assert_eq!(records[0].line, LineAnchor::Line(3));
        assert_eq!(records[0].new, "/** two */");
        assert_eq!(records[1].line, LineAnchor::Line(5));
        assert_eq!(records[1].new, "/** three */");
    }

    #[test]
    fn changes_inside_block_anchor_to_old_start_line() {
        let old = "\n\n/**\n * Adds numbers.\n */\n";
        let new = "/**\n * Adds numbers.\n * @returns sum\n */\n";
        let records = compare(old, new);

        assert_eq!(
            records,
            vec![ChangeRecord::added(FILE, 3, "* @returns sum")]
        );
    }

    #[test]
    fn removed_lines_without_replacement() {
        let old = "/**\n * Adds.\n * @deprecated\n */\n";
        let new = "/**\n * Adds.\n */\n";
        let records = compare(old, new);
        assert_eq!(records, vec![ChangeRecord::removed(FILE, 1, "* @deprecated")]);
    }

    #[test]
    fn paired_records_precede_additions() {
        let old = "/** a */\n";
        let new = "/** b */\n/** c */\n";
        let records = compare(old, new);

        assert_eq!(
            records,
            vec![
                ChangeRecord::modified(FILE, 1, "/** a */", "/** b */"),
                ChangeRecord::added(FILE, 2, "/** c */"),
            ]
        );
    }

    #[test]
    fn insertion_shifts_later_pairings() {
        let old = "/** keep */\n";
        let new = "/** inserted */\n/** keep */\n";
        let records = compare(old, new);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            ChangeRecord::modified(FILE, 1, "/** keep */", "/** inserted */")
        );
        assert_eq!(records[1], ChangeRecord::added(FILE, 2, "/** keep */"));
    }

    #[test]
    fn comparison_is_repeatable() {
        let old = blocks("/** a */\n/**\n * x\n */\n");
        let new = blocks("/** b */\n");
        let differ = BlockDiffer::new();

        let first = differ.compare(FILE, &old, &new).expect("first run");
        let second = differ.compare(FILE, &old, &new).expect("second run");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
