//! Resume Export - Document generation for resumes
//!
//! This crate turns a [`resume_model::ResumeData`] snapshot into the two
//! downloadable artifacts: a paginated PDF laid out with absolute coordinates
//! and a flow-layout DOCX whose pagination is left to the word processor.
//!
//! Both renderers consume the same [`outline::ResumeOutline`], so section
//! order and the omission rules for empty or absent content are shared.

mod error;
mod export;
pub mod image_codec;
pub mod outline;
mod settings;
pub mod pdf;
pub mod docx;

pub use error::*;
pub use export::*;
pub use settings::*;

pub use image_codec::{decode_data_uri, encode_data_uri, DataUri, ImageDecodeError, ImageFormat};
pub use outline::ResumeOutline;

// Re-export the renderer entry points
pub use docx::{render_docx, DocxError, DocxExportOptions};
pub use pdf::{render_pdf, PageSize, PdfError, PdfExportOptions};
