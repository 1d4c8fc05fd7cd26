//! Human-readable context around a mapped diff span.
//!
//! Once an edit operation's stripped-text range has been translated back to a
//! byte range in the normalized (but unstripped) text, this module extracts a
//! display snippet around it and finds the nearest preceding section number,
//! which becomes the discrepancy's location.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Section/clause numbers: a 3-4 digit number with optional decimal
    /// sub-part and parenthesized sub-letters, e.g. "512.3(A)" or "204".
    /// The word boundary sits after the digits: a trailing boundary would
    /// never hold between ')' and a following space, silently dropping the
    /// parenthesized parts.
    static ref RE_SECTION: Regex =
        Regex::new(r"\b\d{3,4}(?:\.\d+)?\b(?:\([A-Za-z0-9]+\))*").unwrap();
}

/// Step `pos` back by up to `count` characters, staying on a char boundary.
fn back_up(text: &str, pos: usize, count: usize) -> usize {
    let mut pos = pos.min(text.len());
    for _ in 0..count {
        match text[..pos].chars().next_back() {
            Some(ch) => pos -= ch.len_utf8(),
            None => break,
        }
    }
    pos
}

/// Step `pos` forward by up to `count` characters, staying on a char boundary.
fn advance(text: &str, pos: usize, count: usize) -> usize {
    let mut pos = pos.min(text.len());
    for _ in 0..count {
        match text[pos..].chars().next() {
            Some(ch) => pos += ch.len_utf8(),
            None => break,
        }
    }
    pos
}

/// Extract a display snippet around a byte range, with `window` characters of
/// context on each side.
///
/// The range must lie on character boundaries of `text` (ranges produced by
/// [`crate::align::StrippedText::map_span`] always do). The snippet is
/// whitespace-collapsed and trimmed for display.
///
/// # Examples
///
/// ```
/// use corpus_audit::context::snippet;
///
/// let text = "claims in the application may be refused by the Office";
/// assert_eq!(snippet(text, 14..25, 4), "the application may");
/// ```
pub fn snippet(text: &str, range: Range<usize>, window: usize) -> String {
    let start = back_up(text, range.start, window);
    let end = advance(text, range.end.min(text.len()), window);
    let raw = &text[start..end];
    let collapsed: Vec<&str> = raw.split_whitespace().collect();
    collapsed.join(" ")
}

/// Find the nearest section number before `before` (a byte offset), or
/// `"unknown"` if no section-like numeral precedes it.
///
/// # Examples
///
/// ```
/// use corpus_audit::context::nearest_section;
///
/// let text = "512.3(A) The deposit requirement applies here";
/// assert_eq!(nearest_section(text, text.len()), "512.3(A)");
/// assert_eq!(nearest_section(text, 0), "unknown");
/// ```
pub fn nearest_section(text: &str, before: usize) -> String {
    let prefix = &text[..before.min(text.len())];
    RE_SECTION
        .find_iter(prefix)
        .last()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
