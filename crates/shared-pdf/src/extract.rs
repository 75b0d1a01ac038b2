use crate::error::ExtractError;
use pdf_extract::extract_text_from_mem;
use std::fs;
use std::path::Path;

/// Input formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    PlainText,
}

impl SourceFormat {
    /// Pick a format from the file extension
    ///
    /// Files without an extension are treated as plain text.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let Some(ext) = path.extension() else {
            return Ok(SourceFormat::PlainText);
        };
        match ext.to_string_lossy().to_lowercase().as_str() {
            "pdf" => Ok(SourceFormat::Pdf),
            "txt" | "text" | "md" => Ok(SourceFormat::PlainText),
            other => Err(ExtractError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

/// Read a contract file and return its text
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), ?format, bytes = bytes.len(), "extracting text");
    extract_text_from_bytes(&bytes, format)
}

/// Decode in-memory document bytes of a known format
pub fn extract_text_from_bytes(bytes: &[u8], format: SourceFormat) -> Result<String, ExtractError> {
    match format {
        SourceFormat::PlainText => decode_utf8(bytes),
        SourceFormat::Pdf => extract_pdf(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ExtractError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ExtractError::UnsupportedEncoding(e.valid_up_to()))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ExtractError::InvalidPdf("missing %PDF header".into()));
    }

    extract_text_from_mem(bytes).map_err(|e| {
        let message = e.to_string();
        let lower = message.to_lowercase();
        if lower.contains("encrypted") || lower.contains("password") {
            ExtractError::PasswordProtected
        } else {
            ExtractError::InvalidPdf(message)
        }
    })
}
