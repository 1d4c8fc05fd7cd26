//! Integration tests for severity classification.
//!
//! Exercises the ordered rule set end to end, including the scenarios the
//! engine is tuned for: extraction artifacts must classify LOW, content
//! defects HIGH, with rule order deciding ties deterministically.

use corpus_audit::severity::{classify, DiffSides, Severity};
use corpus_audit::Discrepancy;

fn classify_snippets(pdf: &str, html: &str) -> Discrepancy {
    let sides = DiffSides {
        pdf_snippet: pdf,
        html_snippet: html,
        ..Default::default()
    };
    classify(&sides, "ch500", "512.3", "")
}

#[test]
fn test_whitespace_rejoining_artifact_is_low() {
    let d = classify_snippets("of the", "ofthe");
    assert_eq!(d.severity, Severity::Low);
}

#[test]
fn test_case_change_is_low() {
    let d = classify_snippets("NO. 5", "No. 5");
    assert_eq!(d.severity, Severity::Low);
}

#[test]
fn test_changed_numeric_reference_is_high() {
    let d = classify_snippets("see \u{00A7} 512.3(A)", "see \u{00A7} 512.4(A)");
    assert_eq!(d.severity, Severity::High);
    assert_eq!(d.description, "Changed section number or numeric reference");
}

#[test]
fn test_dropped_clause_is_high() {
    let d = classify_snippets("registration may be refused.", "");
    assert_eq!(d.severity, Severity::High);
    assert_eq!(d.description, "Substantial text addition or deletion");
}

#[test]
fn test_bare_section_delimiter_is_medium() {
    let sides = DiffSides {
        pdf_snippet: "clause before the boundary clause after",
        html_snippet: "clause before the boundary after",
        pdf_diff: ".202",
        html_diff: "",
    };
    let d = classify(&sides, "ch200", "202", "");
    assert_eq!(d.severity, Severity::Medium);
}

#[test]
fn test_rule_order_artifact_beats_content_rules() {
    // Case-only (rule 3) and the default rule both apply; rule 3 must win.
    let d = classify_snippets("REFUSED ENTIRELY", "refused entirely");
    assert_eq!(d.severity, Severity::Low);
}

#[test]
fn test_classification_is_deterministic() {
    let a = classify_snippets("the work was published", "the work was printed");
    let b = classify_snippets("the work was published", "the work was printed");
    assert_eq!(a, b);
}

#[test]
fn test_classification_is_total() {
    // No input shape reaches an unclassified state
    for (pdf, html) in [
        ("", ""),
        ("x", ""),
        ("", "y"),
        ("123", "abc"),
        ("\u{2022}\u{2022}", "..."),
    ] {
        let d = classify_snippets(pdf, html);
        assert!(matches!(
            d.severity,
            Severity::Low | Severity::Medium | Severity::High
        ));
    }
}

#[test]
fn test_severity_filter_is_monotonic() {
    let all = vec![
        classify_snippets("of the", "ofthe"),                   // LOW
        classify_snippets("may be refused.", "may be refused"), // MEDIUM
        classify_snippets("registration may be refused.", ""),  // HIGH
    ];
    assert_eq!(all[0].severity, Severity::Low);
    assert_eq!(all[1].severity, Severity::Medium);
    assert_eq!(all[2].severity, Severity::High);

    let high_only: Vec<&Discrepancy> = all
        .iter()
        .filter(|d| d.severity >= Severity::High)
        .collect();
    assert_eq!(high_only.len(), 1);
    assert!(high_only.iter().all(|d| d.severity == Severity::High));

    let medium_up: Vec<&Discrepancy> = all
        .iter()
        .filter(|d| d.severity >= Severity::Medium)
        .collect();
    assert_eq!(medium_up.len(), 2);
}
