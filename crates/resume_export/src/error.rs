//! Error types for export operations

use crate::docx::DocxError;
use crate::pdf::PdfError;
use thiserror::Error;

/// A failure while building draw calls or document blocks.
///
/// Image decode failures never surface here; renderers absorb them per image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("DOCX rendering failed: {0}")]
    Docx(#[from] DocxError),
}

/// A failure while handing a finished artifact to its destination
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error saving {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to save an empty {0} artifact")]
    EmptyArtifact(&'static str),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("An export is already in progress")]
    InProgress,
}

impl ExportError {
    /// Message suitable for showing to the person who clicked export
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::InProgress => "An export is already running, please wait.",
            _ => "Export failed, please retry.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
