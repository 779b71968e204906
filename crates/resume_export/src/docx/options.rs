//! DOCX export options
//!
//! Font sizes are in half-points as WordprocessingML stores them; image
//! sizes are in points. Page size and margins are independent of the PDF
//! options.

use crate::pdf::PageSize;
use serde::{Deserialize, Serialize};

/// Bounding box an embedded image is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocxImageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl DocxImageSize {
    pub const fn new(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocxExportOptions {
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default = "default_margin")]
    pub margin_mm: f64,
    #[serde(default = "default_name_size")]
    pub name_size: u32,
    #[serde(default = "default_contact_size")]
    pub contact_size: u32,
    #[serde(default = "default_body_size")]
    pub body_size: u32,
    /// Space after the last paragraph of an entry, in twentieths of a point
    #[serde(default = "default_entry_spacing")]
    pub entry_spacing_after: u32,
    #[serde(default = "default_profile_image")]
    pub profile_image: DocxImageSize,
    #[serde(default = "default_certificate_image")]
    pub certificate_image: DocxImageSize,
}

fn default_margin() -> f64 {
    20.0
}

fn default_name_size() -> u32 {
    32
}

fn default_contact_size() -> u32 {
    24
}

fn default_body_size() -> u32 {
    22
}

fn default_entry_spacing() -> u32 {
    200
}

fn default_profile_image() -> DocxImageSize {
    DocxImageSize::new(100.0, 100.0)
}

fn default_certificate_image() -> DocxImageSize {
    DocxImageSize::new(200.0, 120.0)
}

impl Default for DocxExportOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin_mm: default_margin(),
            name_size: default_name_size(),
            contact_size: default_contact_size(),
            body_size: default_body_size(),
            entry_spacing_after: default_entry_spacing(),
            profile_image: default_profile_image(),
            certificate_image: default_certificate_image(),
        }
    }
}

impl DocxExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_profile_image(mut self, size: DocxImageSize) -> Self {
        self.profile_image = size;
        self
    }

    pub fn with_certificate_image(mut self, size: DocxImageSize) -> Self {
        self.certificate_image = size;
        self
    }
}
