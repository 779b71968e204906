//! PDF Export Public API

use super::canvas::PdfCanvas;
use super::document::DocumentInfo;
use super::layout::layout_resume;
use super::options::PdfExportOptions;
use super::writer::{PdfDocumentWriter, Result};
use crate::outline::ResumeOutline;
use resume_model::ResumeData;

/// Render a resume to PDF bytes in memory
///
/// # Arguments
///
/// * `data` - The resume snapshot; it is only read
/// * `options` - Export options
///
/// # Example
///
/// ```ignore
/// use resume_export::pdf::{render_pdf, PdfExportOptions};
///
/// let options = PdfExportOptions::new().with_title("Resume");
/// let pdf_bytes = render_pdf(&data, &options)?;
/// ```
pub fn render_pdf(data: &ResumeData, options: &PdfExportOptions) -> Result<Vec<u8>> {
    let outline = ResumeOutline::from_resume(data);
    render_outline_pdf(&outline, options)
}

/// Render an already built outline to PDF bytes
pub fn render_outline_pdf(outline: &ResumeOutline<'_>, options: &PdfExportOptions) -> Result<Vec<u8>> {
    let canvas = layout_resume(outline, options);
    write_canvas(&canvas, document_info(outline, options), options.compress)
}

fn write_canvas(canvas: &PdfCanvas, info: DocumentInfo, compress: bool) -> Result<Vec<u8>> {
    PdfDocumentWriter::new(info, compress).write(canvas, Vec::new())
}

fn document_info(outline: &ResumeOutline<'_>, options: &PdfExportOptions) -> DocumentInfo {
    let name = (!outline.header.name.is_empty()).then(|| outline.header.name.to_string());
    DocumentInfo {
        title: options
            .title
            .clone()
            .or_else(|| name.as_ref().map(|n| format!("{n} - Resume"))),
        author: options.author.clone().or(name),
        ..DocumentInfo::new()
    }
}
