//! PDF Writer
//!
//! This module handles the actual PDF file generation, including:
//! - Object numbering and cross-reference table
//! - File structure (header, body, xref, trailer)
//! - Stream compression

use super::canvas::{DrawItem, PdfCanvas};
use super::document::{create_catalog, create_page, create_pages, DocumentInfo, PDF_VERSION};
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::renderer::{image_resource_name, PageRenderer};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset) of every written object
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    /// Set whether to compress streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Write the PDF header
    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", PDF_VERSION))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{} 0 obj\n", obj_num))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it first when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.encoded {
            stream = compress_stream(stream)?;
        }
        stream.dict.insert("Length", stream.data.len() as i64);
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: u32) -> Result<()> {
        let xref_offset = self.position;

        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(num, _)| *num);
        let size = self.next_obj_num;

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", size))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected = 1u32;
        for (obj_num, offset) in entries {
            // Allocated but never written
            while expected < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected += 1;
            }
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
            expected = obj_num + 1;
        }

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", size);
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        trailer.insert("Info", PdfObject::Reference(info_ref));

        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&stream.data)
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.data = encoder
        .finish()
        .map_err(|e| PdfError::Compression(e.to_string()))?;
    stream.encoded = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// Writes a laid-out canvas as a complete PDF file
pub struct PdfDocumentWriter {
    info: DocumentInfo,
    compress: bool,
}

impl PdfDocumentWriter {
    pub fn new(info: DocumentInfo, compress: bool) -> Self {
        Self { info, compress }
    }

    /// Object order: catalog, page tree, info, fonts, images, then a page
    /// and its content stream for every page.
    pub fn write<W: Write>(&self, canvas: &PdfCanvas, writer: W) -> Result<W> {
        if canvas.pages().is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(writer);
        pdf.set_compression(self.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        let font_refs: Vec<_> = canvas
            .fonts()
            .iter()
            .map(|font| (font, pdf.allocate_object()))
            .collect();

        let mut image_refs = Vec::with_capacity(canvas.images().len());
        for image in canvas.images() {
            let image_ref = pdf.allocate_object();
            let mask_ref = image.soft_mask.as_ref().map(|_| pdf.allocate_object());
            image_refs.push((image_ref, mask_ref));
        }

        let page_refs: Vec<(u32, u32)> = canvas
            .pages()
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page, _)| *page).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;
        pdf.write_object(info_ref, &self.info.to_dictionary().into())?;

        let mut font_resources = PdfDictionary::new();
        for (font, font_ref) in &font_refs {
            pdf.write_object(*font_ref, &font.font_dict().into())?;
            font_resources.insert(font.resource_name(), PdfObject::Reference(*font_ref));
        }

        for (image, (image_ref, mask_ref)) in canvas.images().iter().zip(&image_refs) {
            pdf.write_stream_object(*image_ref, image.to_xobject(*mask_ref))?;
            if let (Some(mask_ref), Some(mask)) = (mask_ref, image.soft_mask_xobject()) {
                pdf.write_stream_object(*mask_ref, mask)?;
            }
        }

        let renderer = PageRenderer::new(canvas.page_size().height());
        for (page, (page_ref, content_ref)) in canvas.pages().iter().zip(&page_refs) {
            let mut resources = PdfDictionary::new();
            resources.insert("Font", font_resources.clone());

            let mut xobjects = PdfDictionary::new();
            for item in &page.items {
                if let DrawItem::Image { image, .. } = item {
                    if let Some((image_ref, _)) = image_refs.get(*image) {
                        xobjects.insert(image_resource_name(*image), PdfObject::Reference(*image_ref));
                    }
                }
            }
            if !xobjects.is_empty() {
                resources.insert("XObject", xobjects);
            }

            let page_dict = create_page(pages_ref, canvas.page_size(), resources, *content_ref);
            pdf.write_object(*page_ref, &page_dict.into())?;

            let content = renderer.render(page);
            pdf.write_stream_object(*content_ref, PdfStream::new(content.into_bytes()))?;
        }

        pdf.write_xref_and_trailer(catalog_ref, info_ref)?;
        debug!(pages = page_refs.len(), "PDF document written");
        pdf.finish()
    }
}
