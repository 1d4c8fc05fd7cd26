//! Error types for the comparison engine.
//!
//! All errors here are local to a single chapter's comparison. A batch caller
//! is expected to catch `UnknownChapter` and `MissingSource` per chapter and
//! continue with the remaining chapters rather than abort the run.

use std::path::PathBuf;

/// Result type alias for comparison engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which of a chapter's two input files an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The converted HTML-like markup file.
    Html,
    /// The pre-extracted PDF text file.
    PdfText,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "HTML source"),
            Self::PdfText => write!(f, "PDF text"),
        }
    }
}

/// Error types that can occur while comparing a chapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Chapter identifier is not present in the registry
    #[error("Unknown chapter ID: '{0}'")]
    UnknownChapter(String),

    /// An expected input file does not exist for a chapter
    #[error("{kind} not found: {}", path.display())]
    MissingSource {
        /// Which input file is missing
        kind: SourceKind,
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// Malformed chapter registry file
    #[error("Invalid chapter registry: {0}")]
    Registry(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors the batch orchestrator should skip rather than abort on.
    pub fn is_per_chapter(&self) -> bool {
        matches!(self, Self::UnknownChapter(_) | Self::MissingSource { .. })
    }
}
