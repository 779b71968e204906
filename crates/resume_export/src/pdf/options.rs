//! PDF Export Options
//!
//! Layout distances are given in millimetres and font sizes in points.

use serde::{Deserialize, Serialize};

/// Points per millimetre
pub const MM: f64 = 72.0 / 25.4;

/// Paper size of every page in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width in points
    pub fn width(&self) -> f64 {
        match self {
            PageSize::A4 => 595.28,
            PageSize::Letter => 612.0,
        }
    }

    /// Height in points
    pub fn height(&self) -> f64 {
        match self {
            PageSize::A4 => 841.89,
            PageSize::Letter => 792.0,
        }
    }
}

/// Width and height of a placed image, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBox {
    pub width: f64,
    pub height: f64,
}

impl ImageBox {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    #[serde(default)]
    pub page_size: PageSize,
    /// Margin on all four sides
    #[serde(default = "default_margin")]
    pub margin_mm: f64,
    /// Vertical advance of one body line
    #[serde(default = "default_line_height")]
    pub line_height_mm: f64,
    /// Advance after a heading that introduces a list of entries
    #[serde(default = "default_list_heading_step")]
    pub list_heading_step_mm: f64,
    /// Advance after the Summary and Skills headings
    #[serde(default = "default_text_heading_step")]
    pub text_heading_step_mm: f64,
    #[serde(default = "default_gap")]
    pub entry_gap_mm: f64,
    #[serde(default = "default_gap")]
    pub section_gap_mm: f64,
    #[serde(default = "default_name_size")]
    pub name_size: f64,
    #[serde(default = "default_heading_size")]
    pub heading_size: f64,
    #[serde(default = "default_body_size")]
    pub body_size: f64,
    #[serde(default = "default_profile_image")]
    pub profile_image: ImageBox,
    #[serde(default = "default_certificate_image")]
    pub certificate_image: ImageBox,
    /// Whether to compress content streams
    #[serde(default = "default_compress")]
    pub compress: bool,
    /// Document title
    #[serde(default)]
    pub title: Option<String>,
    /// Document author; falls back to the resume's name
    #[serde(default)]
    pub author: Option<String>,
}

fn default_margin() -> f64 {
    20.0
}

fn default_line_height() -> f64 {
    5.0
}

fn default_list_heading_step() -> f64 {
    10.0
}

fn default_text_heading_step() -> f64 {
    7.0
}

fn default_gap() -> f64 {
    5.0
}

fn default_name_size() -> f64 {
    20.0
}

fn default_heading_size() -> f64 {
    14.0
}

fn default_body_size() -> f64 {
    10.0
}

fn default_profile_image() -> ImageBox {
    ImageBox::new(30.0, 30.0)
}

fn default_certificate_image() -> ImageBox {
    ImageBox::new(50.0, 30.0)
}

fn default_compress() -> bool {
    true
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin_mm: default_margin(),
            line_height_mm: default_line_height(),
            list_heading_step_mm: default_list_heading_step(),
            text_heading_step_mm: default_text_heading_step(),
            entry_gap_mm: default_gap(),
            section_gap_mm: default_gap(),
            name_size: default_name_size(),
            heading_size: default_heading_size(),
            body_size: default_body_size(),
            profile_image: default_profile_image(),
            certificate_image: default_certificate_image(),
            compress: default_compress(),
            title: None,
            author: None,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margin in millimetres
    pub fn with_margin_mm(mut self, margin: f64) -> Self {
        self.margin_mm = margin;
        self
    }

    /// Enable or disable content stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Width available to text, in points
    pub fn content_width(&self) -> f64 {
        self.page_size.width() - 2.0 * self.margin_mm * MM
    }
}
