//! Error types for DOCX export

use thiserror::Error;

/// Errors that can occur while packing a DOCX archive
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing archive entries
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
