//! Property-based tests for the pipeline's structural invariants.

use corpus_audit::align::{align, OpKind, StrippedText};
use corpus_audit::normalize::normalize;
use corpus_audit::severity::{classify, DiffSides, Severity};
use proptest::prelude::*;

proptest! {
    // Normalization reaches a fixed point: the non-stripping pass over
    // already-normalized text changes nothing.
    #[test]
    fn normalized_text_is_a_fixed_point(text in "\\PC{0,200}") {
        let once = normalize(&text, false);
        prop_assert_eq!(normalize(&once, false), once);
    }

    #[test]
    fn stripped_text_is_a_fixed_point(text in "[a-zA-Z0-9 .,:;()/\\n\\t-]{0,200}") {
        let once = normalize(&text, true);
        prop_assert_eq!(normalize(&once, false), once);
    }

    // A mapped span is always a valid, non-empty char-boundary range into
    // the original text, and covers at least one non-whitespace character.
    #[test]
    fn mapped_spans_stay_in_bounds(
        text in "[a-z0-9\u{00E9}\u{4E8C} \\n\\t]{0,120}",
        start in 0usize..150,
        len in 0usize..150,
    ) {
        let stripped = StrippedText::new(&text);
        let range = start..start.saturating_add(len);
        if let Some(span) = stripped.map_span(&range) {
            prop_assert!(span.start < span.end);
            prop_assert!(span.end <= text.len());
            prop_assert!(text.get(span.clone()).is_some());
            prop_assert!(!text[span].trim().is_empty());
        }
    }

    // Inserting whitespace anywhere never produces a reportable operation.
    #[test]
    fn whitespace_insertion_is_invisible(
        text in "[a-zA-Z0-9.,]{0,80}",
        gaps in proptest::collection::vec(any::<bool>(), 0..90),
    ) {
        let mut respaced = String::new();
        for (i, ch) in text.chars().enumerate() {
            if gaps.get(i).copied().unwrap_or(false) {
                respaced.push_str("\n ");
            }
            respaced.push(ch);
        }
        let a = StrippedText::new(&text);
        let b = StrippedText::new(&respaced);
        let ops = align(&a, &b, 1);
        prop_assert!(ops.iter().all(|op| op.kind == OpKind::Equal));
    }

    // With the minimum threshold, the edit script partitions both
    // sequences: contiguous, in order, covering every character once.
    #[test]
    fn edit_script_covers_both_sequences(
        a in "[ab ]{0,60}",
        b in "[ab ]{0,60}",
    ) {
        let sa = StrippedText::new(&a);
        let sb = StrippedText::new(&b);
        let ops = align(&sa, &sb, 1);
        let mut i = 0;
        let mut j = 0;
        for op in &ops {
            prop_assert_eq!(op.pdf.start, i);
            prop_assert_eq!(op.html.start, j);
            i = op.pdf.end;
            j = op.html.end;
        }
        prop_assert_eq!(i, sa.len());
        prop_assert_eq!(j, sb.len());
    }

    // Classification is total over arbitrary snippet content.
    #[test]
    fn classification_never_fails(pdf in "\\PC{0,60}", html in "\\PC{0,60}") {
        let sides = DiffSides {
            pdf_snippet: &pdf,
            html_snippet: &html,
            ..Default::default()
        };
        let d = classify(&sides, "ch200", "unknown", "");
        prop_assert!(d.severity >= Severity::Low);
        prop_assert!(!d.description.is_empty());
    }
}
