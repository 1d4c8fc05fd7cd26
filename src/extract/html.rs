//! Text extraction from converted HTML-like source files.
//!
//! The converted sources use custom structural markup (`<chapter>`,
//! `<section>`, `<paragraph>`, `<toc>`, ...). Extraction removes the purely
//! structural elements whose text must never pollute the comparison, then
//! collects the remaining text with single spaces at element boundaries.

use std::path::Path;

use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result, SourceKind};
use crate::normalize::normalize;

/// Elements that are structure, not content: their text is skipped entirely.
const SKIP_TAGS: &[&str] = &["toc", "tocitem", "page", "head", "title", "style", "script"];

/// Structural elements skipped when collecting per-section text.
const SECTION_SKIP_TAGS: &[&str] = &["toc", "tocitem", "page"];

/// Elements that carry per-section text, with a stable `id` attribute.
const SECTION_TAGS: &[&str] = &["section", "subsection", "provision", "subprovision"];

/// Text of one structural section of a converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Stable structural identifier, e.g. `sec-201`.
    pub id: String,
    /// Display label, e.g. `201` or `202.1`.
    pub label: String,
    /// Normalized text content of the section.
    pub text: String,
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingSource {
                kind: SourceKind::Html,
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Collect the text beneath `element`, skipping `skip` elements and inserting
/// a space at every element boundary.
fn collect_text(element: ElementRef<'_>, skip: &[&str], out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if skip.contains(&child_element.value().name()) {
                continue;
            }
            out.push(' ');
            collect_text(child_element, skip, out);
            out.push(' ');
        }
    }
}

/// The top-level content container: an explicit `<chapter>` element when one
/// exists, the `<body>` otherwise, the document root as a last resort.
fn content_container(document: &Html) -> ElementRef<'_> {
    let chapter = Selector::parse("chapter").expect("static selector");
    if let Some(found) = document.select(&chapter).next() {
        return found;
    }
    let body = Selector::parse("body").expect("static selector");
    document
        .select(&body)
        .next()
        .unwrap_or_else(|| document.root_element())
}

/// Extract the normalized text content of a converted source file.
///
/// Structural elements (TOC entries, page markers, head metadata,
/// style/script blocks) are discarded before extraction. Normalization runs
/// with artifact stripping disabled: converted text does not carry
/// PDF-layout noise, and stripping could eat real content.
///
/// # Errors
///
/// Returns [`Error::MissingSource`] if the file does not exist.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let contents = read_source(path.as_ref())?;
    let document = Html::parse_document(&contents);
    let mut text = String::with_capacity(contents.len());
    collect_text(content_container(&document), SKIP_TAGS, &mut text);
    Ok(normalize(&text, false))
}

/// Extract per-section text from a converted source file.
///
/// Returns one entry per structural section element, in document order,
/// keyed by the element's `id` attribute (`"unknown"` when absent) with its
/// display `label` (empty when absent). Sections whose normalized text is
/// empty are omitted.
///
/// # Errors
///
/// Returns [`Error::MissingSource`] if the file does not exist.
pub fn extract_sections(path: impl AsRef<Path>) -> Result<Vec<Section>> {
    let contents = read_source(path.as_ref())?;
    let document = Html::parse_document(&contents);
    let selector = Selector::parse(&SECTION_TAGS.join(", ")).expect("static selector");

    let mut sections = Vec::new();
    for element in document.select(&selector) {
        let mut raw = String::new();
        collect_text(element, SECTION_SKIP_TAGS, &mut raw);
        let text = normalize(&raw, false);
        if text.is_empty() {
            continue;
        }
        sections.push(Section {
            id: element.value().attr("id").unwrap_or("unknown").to_string(),
            label: element.value().attr("label").unwrap_or("").to_string(),
            text,
        });
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(markup: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(markup.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_extract_text_basic() {
        let file = write_source(
            "<chapter><section_title>What This Covers</section_title>\
             <paragraph>Registration is voluntary.</paragraph></chapter>",
        );
        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "What This Covers Registration is voluntary.");
    }

    #[test]
    fn test_extract_text_skips_structural_elements() {
        let file = write_source(
            "<chapter><toc><tocitem>201 What This Covers 3</tocitem></toc>\
             <page>4</page><paragraph>Real content.</paragraph></chapter>",
        );
        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "Real content.");
    }

    #[test]
    fn test_extract_text_strips_inline_markup() {
        let file = write_source(
            "<chapter><paragraph>See <cite>17 U.S.C. 410</cite> and \
             <a href=\"#x\">section 202</a>.</paragraph></chapter>",
        );
        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "See 17 U.S.C. 410 and section 202 .");
    }

    #[test]
    fn test_extract_text_without_chapter_container() {
        let file = write_source("<body><paragraph>Loose content.</paragraph></body>");
        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "Loose content.");
    }

    #[test]
    fn test_extract_text_missing_file() {
        let err = extract_text("/nonexistent/ch200.html").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSource {
                kind: SourceKind::Html,
                ..
            }
        ));
    }

    #[test]
    fn test_extract_sections() {
        let file = write_source(
            "<chapter>\
             <section id=\"sec-201\" label=\"201\">\
             <section_title>Who May File</section_title>\
             <paragraph>Any author may file.</paragraph>\
             </section>\
             <section id=\"sec-202\" label=\"202\"><toc>noise</toc></section>\
             <section id=\"sec-203\" label=\"203\">\
             <paragraph>Fees are due first.</paragraph>\
             </section>\
             </chapter>",
        );
        let sections = extract_sections(file.path()).unwrap();
        // sec-202 only held TOC noise, so it is omitted
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, "sec-201");
        assert_eq!(sections[0].label, "201");
        assert_eq!(sections[0].text, "Who May File Any author may file.");
        assert_eq!(sections[1].id, "sec-203");
    }

    #[test]
    fn test_extract_sections_defaults() {
        let file = write_source("<chapter><section><paragraph>Text.</paragraph></section></chapter>");
        let sections = extract_sections(file.path()).unwrap();
        assert_eq!(sections[0].id, "unknown");
        assert_eq!(sections[0].label, "");
    }
}
