//! Text normalization for both comparison sources.
//!
//! Turns raw extracted text into a canonical, comparison-ready form: Unicode
//! folding, optional removal of PDF-layout artifacts (repeating headers and
//! footers, table-of-contents dot leaders, bullets, line-break word
//! fragments), and whitespace collapse. Both sources must pass through the
//! same pipeline so that only genuine content differences survive alignment.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Letter-spaced running head, e.g.
    /// "C O M P E N D I U M  O F  U .S. C O P Y R I G H T  O F F I C E ...".
    /// PDF extraction frequently inserts a space between every glyph of the
    /// header, so each letter tolerates interleaved whitespace.
    static ref RE_PAGE_HEADER: Regex = Regex::new(concat!(
        r"(?i)C\s*O\s*M\s*P\s*E\s*N\s*D\s*I\s*U\s*M\s+O\s*F\s+U\s*\.?\s*S\s*\.?",
        r"\s+C\s*O\s*P\s*Y\s*R\s*I\s*G\s*H\s*T\s+O\s*F\s*F\s*I\s*C\s*E",
        r"\s+P\s*R\s*A\s*C\s*T\s*I\s*C\s*E\s*S\s*,?\s*Third\s+Edition",
    ))
    .unwrap();

    /// Short running-head variant: "C O M P E N D I U M : Chapter 200".
    static ref RE_SHORT_HEADER: Regex =
        Regex::new(r"(?i)C\s*O\s*M\s*P\s*E\s*N\s*D\s*I\s*U\s*M\s*:\s*Chapter\s+\d+").unwrap();

    /// Page footer shape: "<Title> : <pageNum> <MM/DD/YYYY>", e.g.
    /// "Chapter 200 : 3 01/28/2021" or "Introduction : 1 01/28/2021".
    static ref RE_FOOTER: Regex =
        Regex::new(r"(?i)[\w\s]{3,40}?\s*:\s*\d+\s+\d{2}/\d{2}/\d{4}").unwrap();

    /// TOC dot leaders with a trailing page number, dots possibly spaced:
    /// "What This Chapter Covers ... .... 3".
    static ref RE_TOC_DOTS: Regex = Regex::new(r"[.\s]{6,}\d+").unwrap();

    /// Leftover dot-leader runs without a page number.
    static ref RE_DOT_RUNS: Regex = Regex::new(r"\.{3,}[\s.]*").unwrap();

    /// "Overview of ..." running head preceding a section number. The `regex`
    /// crate has no lookahead, so the section number is captured and
    /// re-inserted by the replacement instead.
    static ref RE_OVERVIEW: Regex =
        Regex::new(r"(?i)Overview\s+of\s*(?:the\s+)?\w[\w\s]*?(\d{3}\s)").unwrap();

    /// Bullet glyphs carried over from PDF list rendering.
    static ref RE_BULLET: Regex = Regex::new(r"[\u{2022}\u{00B7}\u{25AA}\u{25B8}\u{25BA}]\s*").unwrap();

    /// Markup tags embedded in extracted PDF text (e.g. a stray `</a>`).
    static ref RE_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();

    /// Two adjacent lowercase tokens that are likely one word split by a line
    /// break: "pra ctices", "appli cant". 2-4 letters then 3+ letters.
    static ref RE_WORD_FRAGMENT: Regex = Regex::new(r"\b([a-z]{2,4})\s([a-z]{3,})\b").unwrap();

    /// Any run of whitespace.
    static ref RE_MULTI_WS: Regex = Regex::new(r"\s+").unwrap();
}

/// Fold typographic Unicode characters to ASCII-friendly equivalents and
/// apply canonical (NFC) composition.
///
/// Curly quotes become straight quotes, em/en dashes become hyphen runs,
/// non-breaking spaces become plain spaces, soft hyphens are dropped, and
/// ellipsis glyphs become three dots.
///
/// # Examples
///
/// ```
/// use corpus_audit::normalize::fold_unicode;
///
/// assert_eq!(fold_unicode("\u{201C}quoted\u{201D}"), "\"quoted\"");
/// assert_eq!(fold_unicode("soft\u{00AD}hyphen"), "softhyphen");
/// ```
pub fn fold_unicode(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' => folded.push('"'),
            '\u{2014}' => folded.push_str("--"),
            '\u{2013}' => folded.push('-'),
            '\u{00A0}' => folded.push(' '),
            '\u{2026}' => folded.push_str("..."),
            '\u{00AD}' => {}
            _ => folded.push(ch),
        }
    }
    folded.nfc().collect()
}

/// Rejoin words split by PDF line breaks ("pra ctices" -> "practices").
///
/// Repairs can cascade when a word was split more than once, so the pass is
/// applied iteratively, bounded to three rounds.
fn repair_word_fragments(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..3 {
        let repaired = RE_WORD_FRAGMENT.replace_all(&current, "$1$2").to_string();
        if repaired == current {
            break;
        }
        current = repaired;
    }
    current
}

/// Apply the full normalization pipeline to a text string.
///
/// With `strip_source_artifacts` enabled (the original-document text), known
/// PDF-layout noise is removed: embedded markup tags, repeating page headers
/// and footers, TOC dot leaders, the "Overview of ..." running head, bullet
/// glyphs, and line-break word fragments. Converted HTML text does not carry
/// that noise, so it is normalized with stripping disabled.
///
/// The output never contains a tag or a run of multiple whitespace
/// characters, and the function is pure: same input, same output.
///
/// # Examples
///
/// ```
/// use corpus_audit::normalize::normalize;
///
/// let text = "Registration   may \u{2014} in some\ncases \u{2014} be refused.";
/// assert_eq!(
///     normalize(text, false),
///     "Registration may -- in some cases -- be refused."
/// );
/// ```
pub fn normalize(text: &str, strip_source_artifacts: bool) -> String {
    let mut text = fold_unicode(text);

    if strip_source_artifacts {
        text = RE_TAG.replace_all(&text, "").to_string();
        text = RE_PAGE_HEADER.replace_all(&text, "").to_string();
        text = RE_SHORT_HEADER.replace_all(&text, "").to_string();
        text = RE_FOOTER.replace_all(&text, "").to_string();
        text = RE_TOC_DOTS.replace_all(&text, "").to_string();
        text = RE_DOT_RUNS.replace_all(&text, "").to_string();
        text = RE_OVERVIEW.replace_all(&text, "$1").to_string();
        text = RE_BULLET.replace_all(&text, "").to_string();
        text = repair_word_fragments(&text);
    }

    RE_MULTI_WS.replace_all(&text, " ").trim().to_string()
}
