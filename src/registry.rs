//! Chapter registry: maps chapter identifiers to their source files.
//!
//! The registry is an explicit value passed into the engine's entry points,
//! never ambient global state, so individual chapter comparisons stay
//! independently testable and safe to parallelize. It is read-only once
//! built; a comparison run never mutates it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three files that must exist for a chapter to be checkable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSources {
    /// Converted HTML-like markup file.
    pub html: PathBuf,
    /// Pre-extracted PDF text file.
    pub text: PathBuf,
    /// Original PDF document.
    pub pdf: PathBuf,
}

/// Ordered map from chapter identifier to its source files.
///
/// Iteration order is declaration order, which also fixes the order of a
/// multi-chapter batch run.
///
/// # Examples
///
/// ```
/// use corpus_audit::registry::{ChapterRegistry, ChapterSources};
///
/// let registry = ChapterRegistry::new().with_chapter(
///     "ch200",
///     ChapterSources {
///         html: "public/ch200-registration-process-src.html".into(),
///         text: "pdfs/ch200-registration-process.txt".into(),
///         pdf: "pdfs/ch200-registration-process.pdf".into(),
///     },
/// );
/// assert!(registry.resolve("ch200").is_ok());
/// assert!(registry.resolve("ch9900").is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterRegistry {
    chapters: IndexMap<String, ChapterSources>,
}

impl ChapterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON file.
    ///
    /// The file is a single object mapping chapter ids to
    /// `{ "html": ..., "text": ..., "pdf": ... }` entries; entry order in the
    /// file becomes batch order.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Add a chapter, builder-style. Replaces any existing entry with the
    /// same id, keeping its original position.
    pub fn with_chapter(mut self, id: impl Into<String>, sources: ChapterSources) -> Self {
        self.insert(id, sources);
        self
    }

    /// Add a chapter.
    pub fn insert(&mut self, id: impl Into<String>, sources: ChapterSources) {
        self.chapters.insert(id.into(), sources);
    }

    /// Look up a chapter's source files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChapter`] if the id is not registered.
    pub fn resolve(&self, chapter_id: &str) -> Result<&ChapterSources> {
        self.chapters
            .get(chapter_id)
            .ok_or_else(|| Error::UnknownChapter(chapter_id.to_string()))
    }

    /// Whether a chapter id is registered.
    pub fn contains(&self, chapter_id: &str) -> bool {
        self.chapters.contains_key(chapter_id)
    }

    /// All chapter ids in declaration order.
    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters.keys().map(String::as_str)
    }

    /// Map an HTML filename (or full path) back to its chapter id.
    ///
    /// Useful for selecting chapters to re-check from a list of changed
    /// files. Matches on the file name component only.
    pub fn chapter_for_html_file(&self, html_path: impl AsRef<Path>) -> Option<&str> {
        let name = html_path.as_ref().file_name()?;
        self.chapters
            .iter()
            .find(|(_, sources)| sources.html.file_name() == Some(name))
            .map(|(id, _)| id.as_str())
    }

    /// Number of registered chapters.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the registry has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(stem: &str) -> ChapterSources {
        ChapterSources {
            html: format!("public/{stem}-src.html").into(),
            text: format!("pdfs/{stem}.txt").into(),
            pdf: format!("pdfs/{stem}.pdf").into(),
        }
    }

    #[test]
    fn test_resolve_known_chapter() {
        let registry = ChapterRegistry::new().with_chapter("ch200", sources("ch200-registration"));
        let found = registry.resolve("ch200").unwrap();
        assert_eq!(found.text, PathBuf::from("pdfs/ch200-registration.txt"));
    }

    #[test]
    fn test_resolve_unknown_chapter() {
        let registry = ChapterRegistry::new();
        let err = registry.resolve("ch200").unwrap_err();
        assert!(matches!(err, Error::UnknownChapter(ref id) if id == "ch200"));
    }

    #[test]
    fn test_chapter_ids_preserve_order() {
        let registry = ChapterRegistry::new()
            .with_chapter("introduction", sources("introduction"))
            .with_chapter("ch100", sources("ch100-general-background"))
            .with_chapter("ch200", sources("ch200-registration"));
        let ids: Vec<&str> = registry.chapter_ids().collect();
        assert_eq!(ids, vec!["introduction", "ch100", "ch200"]);
    }

    #[test]
    fn test_chapter_for_html_file() {
        let registry = ChapterRegistry::new().with_chapter("ch200", sources("ch200-registration"));
        assert_eq!(
            registry.chapter_for_html_file("some/dir/ch200-registration-src.html"),
            Some("ch200")
        );
        assert_eq!(registry.chapter_for_html_file("unrelated.html"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let registry = ChapterRegistry::new().with_chapter("glossary", sources("glossary"));
        let json = serde_json::to_string(&registry).unwrap();
        let back: ChapterRegistry = serde_json::from_str(&json).unwrap();
        assert!(back.contains("glossary"));
        assert_eq!(back.len(), 1);
    }
}
