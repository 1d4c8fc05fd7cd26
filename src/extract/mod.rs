//! Text extraction from the two comparison sources.
//!
//! [`html`] walks the converted structured markup; [`pdf_text`] loads the
//! pre-extracted text of the original document. Both feed the normalizer so
//! the comparison sees two strings in the same canonical form.

pub mod html;
pub mod pdf_text;

pub use html::{extract_sections, extract_text, Section};
pub use pdf_text::load_text;
