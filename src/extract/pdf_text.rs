//! Loader for pre-extracted PDF text files.

use std::path::Path;

use crate::error::{Error, Result, SourceKind};
use crate::normalize::normalize;

/// Load and normalize the pre-extracted text of a document.
///
/// The file holds raw text as produced by upstream PDF extraction, so
/// normalization runs with artifact stripping enabled: repeating headers and
/// footers, TOC dot leaders, bullets, and line-break word fragments are all
/// removed.
///
/// # Errors
///
/// Returns [`Error::MissingSource`] if the file does not exist. The caller
/// decides whether that skips one chapter or aborts; this function never
/// panics on a missing file.
pub fn load_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingSource {
                kind: SourceKind::PdfText,
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    Ok(normalize(&raw, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_normalize() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Chapter 200 : 3 01/28/2021\nregistration   pra ctices\n"
        )
        .unwrap();
        let text = load_text(file.path()).unwrap();
        assert!(!text.contains("01/28/2021"));
        assert!(text.contains("registration practices"));
    }

    #[test]
    fn test_missing_file_is_missing_source() {
        let err = load_text("/nonexistent/ch200.txt").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSource {
                kind: SourceKind::PdfText,
                ..
            }
        ));
    }
}
