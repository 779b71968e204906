//! Flow-layout block model
//!
//! The outline is flattened into an ordered list of paragraphs, headings and
//! images. The word processor paginates them.

use super::options::{DocxExportOptions, DocxImageSize};
use crate::image_codec::{image_dimensions, parse_data_uri, ImageFormat};
use crate::outline::{OutlineEntry, OutlineHeader, ResumeOutline};
use std::io::Cursor;
use tracing::warn;

/// A run of text sharing one set of character properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    /// Text; `\n` becomes a line break within the paragraph
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size_half_points: Option<u32>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_size(mut self, half_points: u32) -> Self {
        self.size_half_points = Some(half_points);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph style id, `Normal` when absent
    pub style: Option<&'static str>,
    pub runs: Vec<TextRun>,
    /// Space after the paragraph in twentieths of a point
    pub spacing_after: Option<u32>,
}

impl Paragraph {
    pub fn new(run: TextRun) -> Self {
        Self {
            runs: vec![run],
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: &'static str) -> Self {
        self.style = Some(style);
        self
    }
}

/// An image ready to be packed into `word/media`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub data: Vec<u8>,
    /// Always a format Word can display without conversion
    pub format: ImageFormat,
    pub width_pt: f64,
    pub height_pt: f64,
    /// Shown as the drawing's name and alt text
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Paragraph(Paragraph),
    Image(ImageBlock),
}

/// Turns a resume outline into blocks
#[derive(Debug)]
pub struct DocumentBuilder<'o> {
    options: &'o DocxExportOptions,
    blocks: Vec<Block>,
}

impl<'o> DocumentBuilder<'o> {
    pub fn new(options: &'o DocxExportOptions) -> Self {
        Self {
            options,
            blocks: Vec::new(),
        }
    }

    /// Build the full block list for an outline
    pub fn from_outline(outline: &ResumeOutline<'_>, options: &'o DocxExportOptions) -> Vec<Block> {
        let mut builder = Self::new(options);
        builder.push_header(&outline.header);
        for section in &outline.sections {
            builder.blocks.push(Block::Heading(section.heading().to_string()));
            for entry in &section.entries {
                builder.push_entry(entry);
            }
        }
        builder.finish()
    }

    pub fn finish(self) -> Vec<Block> {
        self.blocks
    }

    fn push_header(&mut self, header: &OutlineHeader<'_>) {
        if let Some(uri) = header.profile_image {
            self.push_image(uri, "Profile photo", self.options.profile_image);
        }

        if !header.name.is_empty() {
            let run = TextRun::new(header.name)
                .bold()
                .with_size(self.options.name_size);
            self.blocks
                .push(Block::Paragraph(Paragraph::new(run).with_style("Title")));
        }

        for line in &header.contact {
            let run = TextRun::new(*line).with_size(self.options.contact_size);
            self.blocks.push(Block::Paragraph(Paragraph::new(run)));
        }
    }

    fn push_entry(&mut self, entry: &OutlineEntry<'_>) {
        let size = self.options.body_size;
        let start = self.blocks.len();

        if let Some(title) = &entry.title {
            let run = TextRun::new(title.as_str()).bold().with_size(size);
            self.blocks.push(Block::Paragraph(Paragraph::new(run)));
        }
        for line in &entry.subtitles {
            let run = TextRun::new(line.as_str()).italic().with_size(size);
            self.blocks.push(Block::Paragraph(Paragraph::new(run)));
        }
        if let Some(body) = &entry.body {
            let run = TextRun::new(body.as_str()).with_size(size);
            self.blocks.push(Block::Paragraph(Paragraph::new(run)));
        }
        if let Some(uri) = entry.image {
            let name = entry.title.as_deref().unwrap_or("Certificate");
            self.push_image(uri, name, self.options.certificate_image);
        }

        // Separate entries with space after their last text paragraph
        let spacing = self.options.entry_spacing_after;
        if let Some(Block::Paragraph(last)) = self.blocks[start..]
            .iter_mut()
            .rev()
            .find(|b| matches!(b, Block::Paragraph(_)))
        {
            last.spacing_after = Some(spacing);
        }
    }

    fn push_image(&mut self, uri: &str, name: &str, bounds: DocxImageSize) {
        match image_block(uri, name, bounds) {
            Some(block) => self.blocks.push(Block::Image(block)),
            None => warn!(image = name, "Skipping image that could not be embedded"),
        }
    }
}

/// Decode a data URI into an image block fitted inside `bounds`
fn image_block(uri: &str, name: &str, bounds: DocxImageSize) -> Option<ImageBlock> {
    let decoded = match parse_data_uri(uri) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(image = name, "Image data URI could not be decoded: {}", e);
            return None;
        }
    };

    // The declared MIME type is not trusted here; only the bytes count
    let (data, format) = match ImageFormat::from_bytes(&decoded.data) {
        format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::Bmp) => {
            (decoded.data, format)
        }
        ImageFormat::WebP => (transcode_to_png(&decoded.data)?, ImageFormat::Png),
        ImageFormat::Unknown => return None,
    };

    let (width_pt, height_pt) = match image_dimensions(&data) {
        Some(pixels) => fit_within(pixels, bounds),
        None => (bounds.width_pt, bounds.height_pt),
    };

    Some(ImageBlock {
        data,
        format,
        width_pt,
        height_pt,
        name: name.to_string(),
    })
}

/// Word has no reliable WebP support, so those are re-encoded as PNG
fn transcode_to_png(data: &[u8]) -> Option<Vec<u8>> {
    let decoded = match image::load_from_memory(data) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("WebP image could not be decoded: {}", e);
            return None;
        }
    };
    let mut png = Cursor::new(Vec::new());
    match decoded.write_to(&mut png, image::ImageFormat::Png) {
        Ok(()) => Some(png.into_inner()),
        Err(e) => {
            warn!("WebP image could not be re-encoded: {}", e);
            None
        }
    }
}

/// Largest size with the image's aspect ratio that fits in `bounds`
fn fit_within((width, height): (u32, u32), bounds: DocxImageSize) -> (f64, f64) {
    let (width, height) = (width as f64, height as f64);
    let scale = (bounds.width_pt / width).min(bounds.height_pt / height);
    (width * scale, height * scale)
}
