//! Chapter comparison orchestration.
//!
//! Ties the pipeline together for one chapter: load and normalize both
//! sources, strip whitespace, align, map each non-equal operation back to
//! readable context, and classify it. Comparisons share no mutable state,
//! so chapters are safe to fan out across threads if a caller wants to.

use indexmap::IndexMap;

use crate::align::{align, OpKind, StrippedText};
use crate::config::AuditConfig;
use crate::context::{nearest_section, snippet};
use crate::error::Result;
use crate::extract;
use crate::registry::ChapterRegistry;
use crate::severity::{classify, DiffSides, Discrepancy};

/// Truncate to at most `max` characters for a one-line description.
fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// Provisional description for an edit operation, from its kind and the raw
/// differing text. A matching classifier rule only replaces this wording
/// when it is empty, so these strings normally survive into the report.
fn describe(kind: OpKind, pdf_diff: &str, html_diff: &str) -> String {
    match kind {
        OpKind::Replace => format!(
            "Text differs: '{}' -> '{}'",
            clip(pdf_diff, 50),
            clip(html_diff, 50)
        ),
        OpKind::Delete => format!("Text in PDF missing from HTML: '{}'", clip(pdf_diff, 80)),
        OpKind::Insert => format!("Text in HTML not in PDF: '{}'", clip(html_diff, 80)),
        OpKind::Equal => String::new(),
    }
}

/// Compare the PDF and HTML text of one chapter.
///
/// Every non-equal alignment operation at or above the configured size
/// threshold produces exactly one [`Discrepancy`]; none are silently
/// dropped. Results are ordered by position in the PDF's normalized text.
///
/// # Errors
///
/// [`crate::error::Error::UnknownChapter`] if the id is not registered, and
/// [`crate::error::Error::MissingSource`] if either input file is absent.
/// Both are per-chapter failures: a batch caller should skip the chapter and
/// continue.
pub fn compare_chapter(
    registry: &ChapterRegistry,
    config: &AuditConfig,
    chapter_id: &str,
) -> Result<Vec<Discrepancy>> {
    let sources = registry.resolve(chapter_id)?;
    let html_text = extract::extract_text(&sources.html)?;
    let pdf_text = extract::load_text(&sources.text)?;

    let pdf_stripped = StrippedText::new(&pdf_text);
    let html_stripped = StrippedText::new(&html_text);

    let ops = align(&pdf_stripped, &html_stripped, config.effective_min_diff_len());
    log::debug!(
        "{chapter_id}: {} alignment ops over {} / {} stripped chars",
        ops.len(),
        pdf_stripped.len(),
        html_stripped.len()
    );

    let mut discrepancies = Vec::new();
    for op in ops {
        if op.kind == OpKind::Equal {
            continue;
        }

        // The location anchors at the operation's start position even when
        // the PDF side is empty (pure insertion).
        let location = match pdf_stripped.map_span(&(op.pdf.start..op.pdf.start + 1)) {
            Some(anchor) => nearest_section(&pdf_text, anchor.start),
            None => "unknown".to_string(),
        };
        let pdf_snippet = match pdf_stripped.map_span(&op.pdf) {
            Some(span) => snippet(&pdf_text, span, config.context_window),
            None => String::new(),
        };
        let html_snippet = match html_stripped.map_span(&op.html) {
            Some(span) => snippet(&html_text, span, config.context_window),
            None => String::new(),
        };

        let pdf_diff = pdf_stripped.slice(op.pdf.clone());
        let html_diff = html_stripped.slice(op.html.clone());
        let description = describe(op.kind, &pdf_diff, &html_diff);

        let sides = DiffSides {
            pdf_snippet: &pdf_snippet,
            html_snippet: &html_snippet,
            pdf_diff: &pdf_diff,
            html_diff: &html_diff,
        };
        discrepancies.push(classify(&sides, chapter_id, &location, &description));
    }

    Ok(discrepancies)
}

/// Compare multiple chapters, skipping per-chapter failures.
///
/// A chapter whose comparison fails (missing source file, unknown id) is
/// logged and recorded with an empty result; it never aborts the batch or
/// suppresses chapters already compared. Result order follows `chapter_ids`.
pub fn compare_chapters<I, S>(
    registry: &ChapterRegistry,
    config: &AuditConfig,
    chapter_ids: I,
) -> IndexMap<String, Vec<Discrepancy>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut results = IndexMap::new();
    for chapter_id in chapter_ids {
        let chapter_id = chapter_id.as_ref();
        match compare_chapter(registry, config, chapter_id) {
            Ok(discrepancies) => {
                results.insert(chapter_id.to_string(), discrepancies);
            }
            Err(e) => {
                log::warn!("Skipping {chapter_id}: {e}");
                results.insert(chapter_id.to_string(), Vec::new());
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_text_untouched() {
        assert_eq!(clip("short", 50), "short");
    }

    #[test]
    fn test_clip_truncates_on_char_boundary() {
        let text = "\u{00E9}".repeat(10);
        assert_eq!(clip(&text, 4).chars().count(), 4);
    }

    #[test]
    fn test_describe_replace() {
        let desc = describe(OpKind::Replace, "abc", "xyz");
        assert_eq!(desc, "Text differs: 'abc' -> 'xyz'");
    }

    #[test]
    fn test_describe_delete_and_insert() {
        assert!(describe(OpKind::Delete, "gone", "").contains("missing from HTML"));
        assert!(describe(OpKind::Insert, "", "added").contains("not in PDF"));
    }

    #[test]
    fn test_describe_equal_is_empty() {
        assert_eq!(describe(OpKind::Equal, "a", "a"), "");
    }
}
