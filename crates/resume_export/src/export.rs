//! Export orchestration
//!
//! The [`Exporter`] hands a resume snapshot to one of the renderers and
//! passes the finished artifact to a [`SaveTarget`]. Only one export runs
//! at a time per exporter; a second call made while one is in flight fails
//! immediately instead of queueing.

use crate::docx::render_docx;
use crate::error::{ExportError, RenderError, Result, SaveError};
use crate::pdf::render_pdf;
use crate::settings::ExportSettings;
use resume_model::ResumeData;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Downloadable artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Docx];

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "resume.pdf",
            ExportFormat::Docx => "resume.docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Short name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
        }
    }
}

/// A rendered document ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn filename(&self) -> &'static str {
        self.format.filename()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Destination for finished artifacts
pub trait SaveTarget {
    /// What a successful save hands back, such as a path
    type Receipt;

    fn save(&self, artifact: ExportArtifact) -> std::result::Result<Self::Receipt, SaveError>;
}

/// Saves artifacts as `<dir>/<filename>`.
///
/// The bytes go to a temporary sibling first and are renamed into place,
/// so a failed save never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectorySaver {
    type Receipt = PathBuf;

    fn save(&self, artifact: ExportArtifact) -> std::result::Result<PathBuf, SaveError> {
        if artifact.is_empty() {
            return Err(SaveError::EmptyArtifact(artifact.format.label()));
        }

        let io_err = |path: &Path| {
            let path = path.display().to_string();
            move |source| SaveError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let target = self.dir.join(artifact.filename());
        let partial = self.dir.join(format!(".{}.partial", artifact.filename()));
        if let Err(e) = std::fs::write(&partial, &artifact.bytes) {
            let _ = std::fs::remove_file(&partial);
            return Err(io_err(&partial)(e));
        }
        if let Err(e) = std::fs::rename(&partial, &target) {
            let _ = std::fs::remove_file(&partial);
            return Err(io_err(&target)(e));
        }

        debug!(path = %target.display(), "Artifact saved");
        Ok(target)
    }
}

/// Drives the renderers and hands their output to a save target
#[derive(Debug)]
pub struct Exporter<S> {
    settings: ExportSettings,
    target: S,
    in_flight: AtomicBool,
}

impl<S: SaveTarget> Exporter<S> {
    pub fn new(settings: ExportSettings, target: S) -> Self {
        Self {
            settings,
            target,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    /// Whether an export is currently running
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Render `resume.pdf` and save it
    pub fn export_as_pdf(&self, data: &ResumeData) -> Result<S::Receipt> {
        self.export(ExportFormat::Pdf, data)
    }

    /// Render `resume.docx` and save it
    pub fn export_as_document(&self, data: &ResumeData) -> Result<S::Receipt> {
        self.export(ExportFormat::Docx, data)
    }

    /// Render and save one artifact. Failures are returned, never retried.
    pub fn export(&self, format: ExportFormat, data: &ResumeData) -> Result<S::Receipt> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let artifact = self.render(format, data)?;
        let size = artifact.len();
        let receipt = self.target.save(artifact)?;

        info!(file = format.filename(), bytes = size, "Export complete");
        Ok(receipt)
    }

    /// Render an artifact without saving it
    pub fn render(
        &self,
        format: ExportFormat,
        data: &ResumeData,
    ) -> std::result::Result<ExportArtifact, RenderError> {
        let bytes = match format {
            ExportFormat::Pdf => render_pdf(data, &self.settings.pdf)?,
            ExportFormat::Docx => render_docx(data, &self.settings.docx)?,
        };
        Ok(ExportArtifact { format, bytes })
    }
}

/// Clears the in-flight flag when the export ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return Err(ExportError::InProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
