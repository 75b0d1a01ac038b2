//! Source document text extraction
//!
//! Turns a contract file on disk into UTF-8 text for the analysis
//! pipeline. PDFs go through `pdf-extract`; plain text is decoded as
//! strict UTF-8. Word processor formats are rejected.

pub mod error;
pub mod extract;

pub use error::ExtractError;
pub use extract::{extract_text, extract_text_from_bytes, SourceFormat};
