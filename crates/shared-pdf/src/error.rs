use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("text is not valid UTF-8 (first bad byte at offset {0})")]
    UnsupportedEncoding(usize),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
