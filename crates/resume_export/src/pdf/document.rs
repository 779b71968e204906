//! PDF Document Structure
//!
//! Catalog, page tree, page and info dictionaries.

use super::fonts::encode_win_ansi;
use super::objects::{PdfDictionary, PdfObject};
use super::options::PageSize;

/// Version written in the file header
pub const PDF_VERSION: &str = "1.4";

/// PDF document information.
///
/// No creation or modification date is written, so that rendering the same
/// resume twice yields identical bytes.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self {
            producer: format!("resume_export {}", env!("CARGO_PKG_VERSION")),
            ..Default::default()
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        if let Some(title) = &self.title {
            dict.insert("Title", PdfObject::string(encode_win_ansi(title)));
        }
        if let Some(author) = &self.author {
            dict.insert("Author", PdfObject::string(encode_win_ansi(author)));
        }
        dict.insert("Producer", PdfObject::string(encode_win_ansi(&self.producer)));
        dict
    }
}

/// Document catalog pointing at the page tree
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::typed("Catalog");
    catalog.insert("Pages", PdfObject::Reference(pages_ref));
    catalog
}

/// Flat page tree
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::typed("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|&r| PdfObject::Reference(r)).collect()),
    );
    pages.insert("Count", page_refs.len() as i64);
    pages
}

/// A page dictionary
pub fn create_page(
    parent_ref: u32,
    page_size: PageSize,
    resources: PdfDictionary,
    contents_ref: u32,
) -> PdfDictionary {
    let mut page = PdfDictionary::typed("Page");
    page.insert("Parent", PdfObject::Reference(parent_ref));
    page.insert(
        "MediaBox",
        PdfObject::rect(0.0, 0.0, page_size.width(), page_size.height()),
    );
    page.insert("Resources", resources);
    page.insert("Contents", PdfObject::Reference(contents_ref));
    page
}
