//! DOCX Writer Infrastructure
//!
//! Packs blocks into a ZIP archive with the OPC part layout Word expects.

use super::blocks::Block;
use super::content_types::ContentTypes;
use super::document_writer::{DocumentWriter, PageSetup};
use super::error::DocxResult;
use super::media_writer::MediaWriter;
use super::relationships::Relationships;
use super::styles_writer::{settings_xml, StylesWriter};
use super::{content_type_values, relationship_types};
use std::io::{Seek, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
    body_size: u32,
    page: PageSetup,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer; `body_size` is the default run size in half-points
    pub fn new(writer: W, body_size: u32) -> Self {
        let mut content_types = ContentTypes::new();
        content_types.add_override("word/document.xml", content_type_values::DOCUMENT);
        content_types.add_override("word/styles.xml", content_type_values::STYLES);
        content_types.add_override("word/settings.xml", content_type_values::SETTINGS);

        let mut root_rels = Relationships::new();
        root_rels.add(relationship_types::DOCUMENT, "word/document.xml");

        let mut doc_rels = Relationships::new();
        doc_rels.add(relationship_types::STYLES, "styles.xml");
        doc_rels.add(relationship_types::SETTINGS, "settings.xml");

        Self {
            zip: ZipWriter::new(writer),
            content_types,
            root_rels,
            doc_rels,
            body_size,
            page: PageSetup::default(),
        }
    }

    /// Page size and margins written to the section properties
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Write a complete DOCX file and hand back the underlying writer
    pub fn write(mut self, blocks: &[Block]) -> DocxResult<W> {
        let mut document = DocumentWriter::new(self.page);
        let mut media = MediaWriter::new();

        for block in blocks {
            match block {
                Block::Heading(text) => document.write_heading(text),
                Block::Paragraph(paragraph) => document.write_paragraph(paragraph),
                Block::Image(image) => {
                    let rel_id = media.add(image, &mut self.doc_rels, &mut self.content_types);
                    document.write_image(image, &rel_id);
                }
            }
        }
        let document_xml = document.finish();

        self.write_file("[Content_Types].xml", &self.content_types.to_xml())?;
        self.write_file("_rels/.rels", &self.root_rels.to_xml())?;
        self.write_file("word/document.xml", &document_xml)?;
        self.write_file("word/styles.xml", &StylesWriter::new(self.body_size).write())?;
        self.write_file("word/settings.xml", &settings_xml())?;
        self.write_file("word/_rels/document.xml.rels", &self.doc_rels.to_xml())?;

        // Images are already compressed
        media.write_media(&mut self.zip, file_options(CompressionMethod::Stored))?;

        debug!(blocks = blocks.len(), images = media.len(), "DOCX package written");
        Ok(self.zip.finish()?)
    }

    /// Write an XML part
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        self.zip
            .start_file(path, file_options(CompressionMethod::Deflated))?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Entries carry a fixed timestamp so identical input packs identically
fn file_options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(DateTime::default())
}
