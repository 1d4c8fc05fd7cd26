//! Severity classification for text discrepancies.
//!
//! Every diff span that survives the size threshold is classified by an
//! ordered rule list; the first matching rule wins and classification never
//! fails (the final rule is a catch-all). Rule order is load-bearing:
//! artifact suppression runs before content-change detection, so a span that
//! is simultaneously a case-only artifact and a "text difference" resolves to
//! the artifact rule. Do not reorder.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How likely a discrepancy is to be a genuine content defect.
///
/// Ordered `Low < Medium < High`, so severity thresholds compare directly:
/// `d.severity >= Severity::High` never admits a `Medium` or `Low` item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Extraction/formatting artifact, safe to ignore.
    Low,
    /// Worth a human look.
    Medium,
    /// Likely genuine content defect.
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!(
                "unknown severity: '{s}' (expected: LOW, MEDIUM, HIGH)"
            )),
        }
    }
}

/// Which checker produced a discrepancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscrepancySource {
    /// This engine's character-level comparison.
    #[default]
    Algorithmic,
    /// The external LLM-based semantic checker.
    Llm,
}

impl std::fmt::Display for DiscrepancySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Algorithmic => write!(f, "algorithmic"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// A single classified difference between the PDF and HTML text of a chapter.
///
/// Constructed once by the classifier and never mutated; reporting
/// collaborators read the fields and own serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Classified severity.
    pub severity: Severity,
    /// Chapter the discrepancy was found in.
    pub chapter: String,
    /// Nearest preceding section number in the PDF text, or `"unknown"`.
    pub location: String,
    /// Context snippet from the PDF text (may be empty for pure insertions).
    pub pdf_text: String,
    /// Context snippet from the HTML text (may be empty for pure deletions).
    pub html_text: String,
    /// One-line rationale for the classification.
    pub description: String,
    /// Which checker produced this record.
    pub source: DiscrepancySource,
}

/// The two context snippets and the two raw (space-stripped) diff substrings
/// for one edit operation.
///
/// The raw diff text is what actually changed; the snippets add surrounding
/// context for display. Rules 5 and 6 prefer the raw text when it is
/// available because context words would mask the shape being tested.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffSides<'a> {
    /// Context snippet from the PDF side.
    pub pdf_snippet: &'a str,
    /// Context snippet from the HTML side.
    pub html_snippet: &'a str,
    /// Raw stripped-text diff from the PDF side.
    pub pdf_diff: &'a str,
    /// Raw stripped-text diff from the HTML side.
    pub html_diff: &'a str,
}

lazy_static! {
    /// Page footer shape: "<Title> : <pageNum> <MM/DD/YYYY>", anchored at the
    /// snippet start.
    static ref RE_FOOTER_SNIPPET: Regex =
        Regex::new(r"(?i)^[\w\s]{3,40}?\s*:\s*\d+\s+\d{2}/\d{2}/\d{4}").unwrap();

    /// Section-number-shaped substrings ("102.3", "512.3(A)").
    static ref RE_SECTION_SHAPE: Regex = Regex::new(r"\d+\.\d+(?:\([A-Za-z0-9]+\))*").unwrap();

    /// Any digit run.
    static ref RE_DIGITS: Regex = Regex::new(r"\d+").unwrap();

    /// TOC shape with spacing intact: 3+ repetitions of a section number
    /// followed by a run of capitalized title words.
    static ref RE_TOC: Regex =
        Regex::new(r"(?:\d{3,4}(?:\.\d+)?\s+(?:[A-Z][a-z]+\s+)+){3,}").unwrap();

    /// TOC shape after whitespace stripping:
    /// "201WhatThisChapterCovers202PurposesandAdvantages...".
    static ref RE_TOC_STRIPPED: Regex =
        Regex::new(r"(?:\d{3,4}(?:\.\d+)?(?:[A-Z][a-z]+)+){3,}").unwrap();

    /// A bare section-number delimiter: optional leading period, 3-4 digit
    /// number with optional decimal part, optional trailing period
    /// (".202", ". 204.3").
    static ref RE_SECTION_DELIM: Regex =
        Regex::new(r"^\.?\s*\d{3,4}(?:\.\d+)?\s*\.?$").unwrap();
}

/// Vocabulary of the corpus's repeating page header/footer.
const HEADER_FOOTER_WORDS: &[&str] = &[
    "compendium",
    "copyright",
    "office",
    "practices",
    "third",
    "edition",
];

fn strip_all_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Rule 1: the snippets are equal once all whitespace is removed.
///
/// Catches the most common extraction artifact: words joined or split at
/// line boundaries ("ofthe" vs "of the").
fn is_whitespace_only(pdf_snippet: &str, html_snippet: &str) -> bool {
    strip_all_whitespace(pdf_snippet) == strip_all_whitespace(html_snippet)
}

/// Rule 2: a snippet is dominated by page header vocabulary, or starts with
/// the "<Title> : <pageNum> <date>" footer shape.
fn is_header_footer(snippet: &str) -> bool {
    let lowered = snippet.to_lowercase();
    let words: HashSet<&str> = lowered.split_whitespace().collect();
    if !words.is_empty() {
        let hits = words
            .iter()
            .filter(|w| HEADER_FOOTER_WORDS.contains(*w))
            .count();
        if hits * 2 > words.len() {
            return true;
        }
    }
    RE_FOOTER_SNIPPET.is_match(snippet)
}

/// Rule 3: case-insensitive equality ("NO." vs "No.").
fn is_case_only(pdf_snippet: &str, html_snippet: &str) -> bool {
    pdf_snippet.to_lowercase() == html_snippet.to_lowercase()
}

/// Rule 4: equal after trimming boundary punctuation, but not identical.
fn is_punctuation_only(pdf_snippet: &str, html_snippet: &str) -> bool {
    let punct: &[char] = &['.', ',', ';', ':', '!', '?', ' '];
    pdf_snippet.trim_end_matches(punct) == html_snippet.trim_end_matches(punct)
        && pdf_snippet != html_snippet
}

/// Rule 5 helper: dense "section number + capitalized title" runs.
///
/// Known heuristic limitation: when no raw diff text is available and this
/// falls back to a context snippet, ordinary numbered-list content that
/// merely resembles a TOC can match. Tightening this needs corpus
/// validation; do not adjust it speculatively.
fn looks_like_toc(text: &str) -> bool {
    RE_TOC.is_match(text) || RE_TOC_STRIPPED.is_match(text)
}

/// Rule 6: the trimmed raw diff is nothing but a section-number delimiter.
fn is_section_delimiter(diff: &str) -> bool {
    let trimmed = diff.trim();
    !trimmed.is_empty() && RE_SECTION_DELIM.is_match(trimmed)
}

/// Rule 7: section-number-shaped substrings or digit runs differ.
fn has_changed_numbers(pdf_snippet: &str, html_snippet: &str) -> bool {
    let pdf_sections: HashSet<&str> = RE_SECTION_SHAPE
        .find_iter(pdf_snippet)
        .map(|m| m.as_str())
        .collect();
    let html_sections: HashSet<&str> = RE_SECTION_SHAPE
        .find_iter(html_snippet)
        .map(|m| m.as_str())
        .collect();
    if pdf_sections != html_sections && !(pdf_sections.is_empty() && html_sections.is_empty()) {
        return true;
    }
    // Ordered comparison: reordering digit runs is still a change
    let pdf_digits: Vec<&str> = RE_DIGITS.find_iter(pdf_snippet).map(|m| m.as_str()).collect();
    let html_digits: Vec<&str> = RE_DIGITS.find_iter(html_snippet).map(|m| m.as_str()).collect();
    pdf_digits != html_digits
}

/// Rule 8: one side empty, or length ratio below 0.5.
fn is_substantial_change(pdf_snippet: &str, html_snippet: &str) -> bool {
    if pdf_snippet.is_empty() || html_snippet.is_empty() {
        return true;
    }
    let (shorter, longer) = if pdf_snippet.len() < html_snippet.len() {
        (pdf_snippet.len(), html_snippet.len())
    } else {
        (html_snippet.len(), pdf_snippet.len())
    };
    (shorter as f64) / (longer as f64) < 0.5
}

/// Classify one diff span and build its [`Discrepancy`] record.
///
/// `description` is the caller's provisional wording built from the raw edit
/// operation kind; it is kept verbatim when non-empty, and the matching
/// rule's fixed wording is used only as a fallback. Classification is total:
/// the default rule guarantees every span gets a severity.
///
/// # Examples
///
/// ```
/// use corpus_audit::severity::{classify, DiffSides, Severity};
///
/// let sides = DiffSides {
///     pdf_snippet: "of the",
///     html_snippet: "ofthe",
///     ..Default::default()
/// };
/// let d = classify(&sides, "ch200", "204", "");
/// assert_eq!(d.severity, Severity::Low);
/// ```
pub fn classify(
    sides: &DiffSides<'_>,
    chapter: &str,
    location: &str,
    description: &str,
) -> Discrepancy {
    let build = |severity: Severity, fallback: &str| Discrepancy {
        severity,
        chapter: chapter.to_string(),
        location: location.to_string(),
        pdf_text: sides.pdf_snippet.to_string(),
        html_text: sides.html_snippet.to_string(),
        description: if description.is_empty() {
            fallback.to_string()
        } else {
            description.to_string()
        },
        source: DiscrepancySource::Algorithmic,
    };

    // Rule 1: whitespace/hyphenation only
    if is_whitespace_only(sides.pdf_snippet, sides.html_snippet) {
        return build(Severity::Low, "Whitespace/hyphenation difference only");
    }

    // Rule 2: page header/footer content
    if is_header_footer(sides.pdf_snippet) || is_header_footer(sides.html_snippet) {
        return build(Severity::Low, "PDF header/footer artifact");
    }

    // Rule 3: case-only
    if is_case_only(sides.pdf_snippet, sides.html_snippet) {
        return build(Severity::Low, "Case-only difference (e.g. NO. -> No.)");
    }

    // Rule 4: punctuation-only
    if is_punctuation_only(sides.pdf_snippet, sides.html_snippet) {
        return build(Severity::Medium, "Punctuation difference");
    }

    // Rule 5: TOC shape, one side empty. Prefer the raw diff text; context
    // words in a snippet would hide the pattern.
    let check_pdf = if sides.pdf_diff.is_empty() {
        sides.pdf_snippet
    } else {
        sides.pdf_diff
    };
    let check_html = if sides.html_diff.is_empty() {
        sides.html_snippet
    } else {
        sides.html_diff
    };
    if check_html.trim().is_empty() && looks_like_toc(check_pdf) {
        return build(Severity::Low, "PDF table of contents content not in HTML");
    }
    if check_pdf.trim().is_empty() && looks_like_toc(check_html) {
        return build(Severity::Low, "HTML table of contents content not in PDF");
    }

    // Rule 6: bare section-number delimiter
    if is_section_delimiter(sides.pdf_diff) || is_section_delimiter(sides.html_diff) {
        return build(Severity::Medium, "Section number delimiter difference");
    }

    // Rule 7: changed numeric content
    if has_changed_numbers(sides.pdf_snippet, sides.html_snippet) {
        return build(Severity::High, "Changed section number or numeric reference");
    }

    // Rule 8: substantial addition/deletion
    if is_substantial_change(sides.pdf_snippet, sides.html_snippet) {
        return build(Severity::High, "Substantial text addition or deletion");
    }

    // Rule 9: default
    build(Severity::Medium, "Text difference")
}
