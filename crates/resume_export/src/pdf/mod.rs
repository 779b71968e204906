//! PDF Export Module
//!
//! Lays a resume out on fixed-size pages with absolute coordinates and writes
//! the result as a PDF 1.4 file.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: PDF document structure (Catalog, Pages, Info)
//! - `content`: Content stream generation (text and image operators)
//! - `fonts`: Standard Helvetica metrics and WinAnsi encoding
//! - `wrap`: Line wrapping against the font metrics
//! - `images`: Image XObject generation
//! - `canvas`: Paged drawing surface and layout cursor
//! - `layout`: Places the resume outline onto the canvas
//! - `renderer`: Converts a page's draw calls to a content stream
//! - `writer`: Writes objects, xref table and trailer
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod canvas;
mod content;
mod document;
mod fonts;
mod images;
mod layout;
mod objects;
mod options;
mod renderer;
mod wrap;
mod writer;

pub use api::*;
pub use canvas::{DrawItem, LayoutCursor, PageDraw, PdfCanvas};
pub use fonts::StandardFont;
pub use layout::{layout_entry, layout_header, layout_resume, layout_section, Metrics};
pub use options::*;
pub use wrap::wrap_text;

// Re-export error type
pub use writer::PdfError;
