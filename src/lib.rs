//! # Corpus Audit
//!
//! Text discrepancy detection engine for converted document corpora: compares
//! machine-converted structured markup against text extracted from the
//! original PDF and classifies every difference it finds.
//!
//! The hard part is telling thousands of harmless extraction artifacts
//! (hyphenation breaks, repeating page headers, TOC dot leaders, case
//! changes) apart from genuine content defects (dropped clauses, changed
//! numbers, substituted words) with no ground truth available. The engine
//! does this with structural and lexical heuristics tuned to one corpus's
//! extraction noise; it is deliberately not a general-purpose diff library.
//!
//! ## Pipeline
//!
//! 1. **Extraction** ([`extract`]): walk the converted markup / load the
//!    pre-extracted PDF text.
//! 2. **Normalization** ([`normalize`]): Unicode folding, artifact
//!    stripping, whitespace collapse, into one canonical comparable form.
//! 3. **Alignment** ([`align`]): whitespace-invariant character-level edit
//!    script between the two texts, with an index map back to the
//!    unstripped text.
//! 4. **Context mapping** ([`context`]): readable snippets plus the nearest
//!    preceding section number.
//! 5. **Classification** ([`severity`]): ordered first-match-wins rules
//!    assign `LOW`/`MEDIUM`/`HIGH` to every difference.
//!
//! Reporting (console/Markdown/JSON), CLI orchestration, and the LLM-based
//! secondary checker are external collaborators that consume the
//! [`Discrepancy`] records this engine produces.
//!
//! ## Quick start
//!
//! ```no_run
//! use corpus_audit::{compare_chapter, AuditConfig, ChapterRegistry};
//!
//! # fn main() -> corpus_audit::Result<()> {
//! let registry = ChapterRegistry::from_json_file("chapters.json")?;
//! let config = AuditConfig::default();
//!
//! for discrepancy in compare_chapter(&registry, &config, "ch200")? {
//!     println!(
//!         "[{}] {} at {}: {}",
//!         discrepancy.severity,
//!         discrepancy.chapter,
//!         discrepancy.location,
//!         discrepancy.description
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The engine is synchronous and shares no mutable state between chapter
//! comparisons, so callers may parallelize across chapters freely.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Engine configuration and chapter registry
pub mod config;
pub mod registry;

// Text preparation
pub mod extract;
pub mod normalize;

// Comparison core
pub mod align;
pub mod compare;
pub mod context;
pub mod severity;

pub use config::AuditConfig;
pub use compare::{compare_chapter, compare_chapters};
pub use error::{Error, Result, SourceKind};
pub use registry::{ChapterRegistry, ChapterSources};
pub use severity::{Discrepancy, DiscrepancySource, Severity};
