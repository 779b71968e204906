//! Public API for DOCX export

use super::blocks::DocumentBuilder;
use super::document_writer::PageSetup;
use super::error::DocxResult;
use super::options::DocxExportOptions;
use super::writer::DocxWriter;
use crate::outline::ResumeOutline;
use resume_model::ResumeData;
use std::io::Cursor;

/// Render a resume to DOCX bytes in memory
///
/// # Example
///
/// ```ignore
/// use resume_export::docx::{render_docx, DocxExportOptions};
///
/// let bytes = render_docx(&data, &DocxExportOptions::default())?;
/// std::fs::write("resume.docx", bytes)?;
/// ```
pub fn render_docx(data: &ResumeData, options: &DocxExportOptions) -> DocxResult<Vec<u8>> {
    let outline = ResumeOutline::from_resume(data);
    render_outline_docx(&outline, options)
}

/// Render an already built outline to DOCX bytes
pub fn render_outline_docx(
    outline: &ResumeOutline<'_>,
    options: &DocxExportOptions,
) -> DocxResult<Vec<u8>> {
    let blocks = DocumentBuilder::from_outline(outline, options);
    let page = PageSetup::new(options.page_size, options.margin_mm);
    let cursor = DocxWriter::new(Cursor::new(Vec::new()), options.body_size)
        .with_page(page)
        .write(&blocks)?;
    Ok(cursor.into_inner())
}
