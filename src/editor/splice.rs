//! Back-to-front application of text edits

use super::TextEdit;
use crate::types::{DocError, Result};

/// Apply `edits` to `source`.
///
/// Edits are validated (in bounds, on char boundaries, pairwise
/// non-overlapping) and applied from the end of the file towards the start so
/// no pending span is shifted. When a removal and an insertion share a start
/// offset, the removal is applied first and the insertion lands in its place.
pub fn apply_edits(path: &str, source: &str, edits: &[TextEdit]) -> Result<String> {
    for edit in edits {
        let span = edit.span;
        if span.end > source.len()
            || !source.is_char_boundary(span.start)
            || !source.is_char_boundary(span.end)
        {
            return Err(DocError::EditConflict {
                path: path.to_string(),
                message: format!(
                    "edit for {} at {}..{} is outside the file",
                    edit.unit, span.start, span.end
                ),
            });
        }
    }

    for (i, a) in edits.iter().enumerate() {
        for b in &edits[i + 1..] {
            if a.span.overlaps(&b.span) {
                return Err(DocError::EditConflict {
                    path: path.to_string(),
                    message: format!(
                        "edits for {} ({}..{}) and {} ({}..{}) overlap",
                        a.unit, a.span.start, a.span.end, b.unit, b.span.start, b.span.end
                    ),
                });
            }
        }
    }

    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| (b.span.start, b.span.end).cmp(&(a.span.start, a.span.end)));

    let mut text = source.to_string();
    for edit in ordered {
        text.replace_range(edit.span.start..edit.span.end, &edit.replacement);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Span;
    use proptest::prelude::*;

    fn edit(start: usize, end: usize, replacement: &str) -> TextEdit {
        TextEdit::new(Span::new(start, end), replacement, "unit")
    }

    #[test]
    fn test_edits_applied_back_to_front() {
        let source = "aaa\nbbb\nccc\n";
        let edits = vec![edit(4, 8, ""), edit(0, 0, "top\n"), edit(12, 12, "end\n")];
        assert_eq!(
            apply_edits("f.py", source, &edits).unwrap(),
            "top\naaa\nccc\nend\n"
        );
    }

    #[test]
    fn test_removal_and_insertion_at_same_offset() {
        let source = "x\nold\ny\n";
        let edits = vec![edit(2, 2, "new\n"), edit(2, 6, "")];
        assert_eq!(apply_edits("f.py", source, &edits).unwrap(), "x\nnew\ny\n");
    }

    #[test]
    fn test_overlapping_edits_rejected() {
        let source = "0123456789";
        let result = apply_edits("f.py", source, &[edit(1, 5, ""), edit(4, 8, "")]);
        assert!(matches!(result, Err(DocError::EditConflict { .. })));

        let result = apply_edits("f.py", source, &[edit(3, 3, "a"), edit(3, 3, "b")]);
        assert!(matches!(result, Err(DocError::EditConflict { .. })));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let result = apply_edits("f.py", "abc", &[edit(2, 9, "")]);
        assert!(matches!(result, Err(DocError::EditConflict { .. })));

        // Inside a multi-byte character
        let result = apply_edits("f.py", "é", &[edit(1, 1, "x")]);
        assert!(matches!(result, Err(DocError::EditConflict { .. })));
    }

    proptest! {
        #[test]
        fn prop_insertions_can_be_undone(
            lines in proptest::collection::vec("[a-z ]{0,12}", 1..12),
            picks in proptest::collection::btree_set(0usize..12, 0..6),
        ) {
            let source: String = lines.iter().map(|l| format!("{}\n", l)).collect();
            let starts: Vec<usize> = std::iter::once(0)
                .chain(source.match_indices('\n').map(|(i, _)| i + 1))
                .collect();

            let offsets: Vec<usize> = picks
                .into_iter()
                .filter_map(|i| starts.get(i).copied())
                .collect();
            let inserts: Vec<TextEdit> = offsets
                .iter()
                .map(|&at| edit(at, at, "\"\"\"Doc.\"\"\"\n"))
                .collect();

            let filled = apply_edits("p.py", &source, &inserts).unwrap();
            prop_assert_eq!(filled.len(), source.len() + inserts.len() * 11);

            // The i-th insertion (ascending) moved by the i insertions before it
            let removals: Vec<TextEdit> = offsets
                .iter()
                .enumerate()
                .map(|(i, &at)| edit(at + i * 11, at + (i + 1) * 11, ""))
                .collect();
            let restored = apply_edits("p.py", &filled, &removals).unwrap();
            prop_assert_eq!(restored, source);
        }
    }
}
