use crate::documents::EditableDocument;
use crate::types::{ResolvedEdit, TextBlock};
use serde::Serialize;

/// Splice disjoint, ascending edits into `text` in one left-to-right pass.
///
/// Edits that overlap an earlier one or do not sit on char boundaries are
/// skipped with a warning; the resolver never produces them.
pub fn apply_edits(text: &str, edits: &[ResolvedEdit]) -> String {
    let removed: usize = edits.iter().map(ResolvedEdit::len).sum();
    let inserted: usize = edits.iter().map(|e| e.replacement.len()).sum();
    let mut out = String::with_capacity((text.len() + inserted).saturating_sub(removed));

    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor
            || edit.end > text.len()
            || edit.start > edit.end
            || !text.is_char_boundary(edit.start)
            || !text.is_char_boundary(edit.end)
        {
            tracing::warn!(
                "skipping malformed edit {}..{} (cursor {cursor}, len {})",
                edit.start,
                edit.end,
                text.len()
            );
            continue;
        }
        out.push_str(&text[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Resolved edits for one block of a document.
#[derive(Debug, Clone)]
pub struct BlockPlan {
    pub block: TextBlock,
    pub edits: Vec<ResolvedEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockOutcome {
    /// No edits; the block was never written
    Unchanged,
    Rewritten { edits_applied: usize },
    /// The backend refused the write; the block keeps its original content
    Failed { reason: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyReport {
    /// (block index, outcome) in plan order
    pub outcomes: Vec<(usize, BlockOutcome)>,
    pub blocks_modified: usize,
    pub blocks_failed: usize,
    pub edits_applied: usize,
}

impl ApplyReport {
    pub fn outcome(&self, index: usize) -> Option<&BlockOutcome> {
        self.outcomes
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, outcome)| outcome)
    }
}

/// Apply each block's edits through the document backend.
///
/// A write failure on one block leaves that block untouched and does not
/// stop the remaining blocks.
pub fn apply_to_document(doc: &mut dyn EditableDocument, plans: &[BlockPlan]) -> ApplyReport {
    let mut report = ApplyReport::default();

    for plan in plans {
        let index = plan.block.index;
        if plan.edits.is_empty() {
            report.outcomes.push((index, BlockOutcome::Unchanged));
            continue;
        }

        let rewritten = apply_edits(&plan.block.text, &plan.edits);
        if rewritten == plan.block.text {
            report.outcomes.push((index, BlockOutcome::Unchanged));
            continue;
        }

        match doc.write_block(&plan.block, &rewritten) {
            Ok(()) => {
                tracing::debug!(
                    block = index,
                    location = %plan.block.location,
                    "applied {} edits",
                    plan.edits.len()
                );
                report.blocks_modified += 1;
                report.edits_applied += plan.edits.len();
                report.outcomes.push((
                    index,
                    BlockOutcome::Rewritten {
                        edits_applied: plan.edits.len(),
                    },
                ));
            }
            Err(err) => {
                tracing::warn!(block = index, location = %plan.block.location, "leaving block unmodified: {err}");
                report.blocks_failed += 1;
                report.outcomes.push((
                    index,
                    BlockOutcome::Failed {
                        reason: err.to_string(),
                    },
                ));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::TextDocument;
    use crate::error::{ApplicationError, DocumentError};
    use crate::types::DocumentFormat;

    fn edit(start: usize, end: usize, replacement: &str) -> ResolvedEdit {
        ResolvedEdit {
            start,
            end,
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_splice_multibyte() {
        let text = "Résumé: good café";
        let good = text.find("good").unwrap();
        let out = apply_edits(text, &[edit(good, good + 4, "exceptional")]);
        assert_eq!(out, "Résumé: exceptional café");
    }

    #[test]
    fn test_malformed_edits_skipped() {
        let text = "abcdef";
        let out = apply_edits(text, &[edit(0, 3, "X"), edit(2, 4, "Y"), edit(4, 9, "Z")]);
        assert_eq!(out, "Xdef");
    }

    #[test]
    fn test_empty_plan_leaves_block_untouched() {
        let mut doc = TextDocument::from_bytes(b"line one\nline two\n").unwrap();
        let blocks = doc.blocks();
        let plans = vec![
            BlockPlan {
                block: blocks[0].clone(),
                edits: vec![],
            },
            BlockPlan {
                block: blocks[1].clone(),
                edits: vec![edit(5, 8, "2")],
            },
        ];
        let report = apply_to_document(&mut doc, &plans);
        assert_eq!(report.blocks_modified, 1);
        assert_eq!(report.edits_applied, 1);
        assert_eq!(report.outcome(0), Some(&BlockOutcome::Unchanged));
        assert_eq!(doc.serialize().unwrap(), b"line one\nline 2\n");
    }

    /// Backend that refuses every odd block.
    struct PickyDocument {
        blocks: Vec<TextBlock>,
        written: Vec<(usize, String)>,
    }

    impl EditableDocument for PickyDocument {
        fn format(&self) -> DocumentFormat {
            DocumentFormat::Txt
        }

        fn blocks(&self) -> Vec<TextBlock> {
            self.blocks.clone()
        }

        fn write_block(&mut self, block: &TextBlock, text: &str) -> Result<(), ApplicationError> {
            if block.index % 2 == 1 {
                return Err(ApplicationError::UnsupportedStructure {
                    block: block.index,
                    reason: "text box".to_string(),
                });
            }
            self.written.push((block.index, text.to_string()));
            Ok(())
        }

        fn serialize(&self) -> Result<Vec<u8>, DocumentError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_application_error_isolated_to_block() {
        let blocks: Vec<TextBlock> = (0..3)
            .map(|i| {
                let mut block = TextBlock::detached("good work");
                block.index = i;
                block
            })
            .collect();
        let plans: Vec<BlockPlan> = blocks
            .iter()
            .map(|b| BlockPlan {
                block: b.clone(),
                edits: vec![edit(0, 4, "great")],
            })
            .collect();
        let mut doc = PickyDocument {
            blocks,
            written: Vec::new(),
        };

        let report = apply_to_document(&mut doc, &plans);
        assert_eq!(report.blocks_modified, 2);
        assert_eq!(report.blocks_failed, 1);
        assert!(matches!(report.outcome(1), Some(BlockOutcome::Failed { .. })));
        assert_eq!(
            doc.written,
            vec![(0, "great work".to_string()), (2, "great work".to_string())]
        );
    }
}
