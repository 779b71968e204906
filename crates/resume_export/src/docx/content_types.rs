//! [Content_Types].xml generation
//!
//! This file declares the content type of every part in the package.

use super::{content_type_values, namespaces};
use std::collections::BTreeMap;

/// Content types of a DOCX package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension (e.g., "xml" -> "application/xml")
    defaults: BTreeMap<String, String>,
    /// Override content types by part name (e.g., "/word/document.xml" -> "...")
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Create a new ContentTypes with default DOCX settings
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type_values::RELATIONSHIPS);
        ct.add_default("xml", content_type_values::XML);
        ct
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let part_name = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{}", part_name)
        };
        self.overrides.insert(part_name, content_type.to_string());
    }

    /// Content type for a part, overrides first
    pub fn get_content_type(&self, path: &str) -> Option<&str> {
        let normalized = format!("/{}", path.trim_start_matches('/'));
        if let Some(ct) = self.overrides.get(&normalized) {
            return Some(ct.as_str());
        }
        let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }

    /// Generate XML content
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespaces::CT));
        xml.push('\n');

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                ext, ct
            ));
            xml.push('\n');
        }

        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                part, ct
            ));
            xml.push('\n');
        }

        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut ct = ContentTypes::new();
        ct.add_default("png", "image/png");
        ct.add_override("word/document.xml", content_type_values::DOCUMENT);

        assert_eq!(ct.get_content_type("word/document.xml"), Some(content_type_values::DOCUMENT));
        assert_eq!(ct.get_content_type("/word/styles.xml"), Some(content_type_values::XML));
        assert_eq!(ct.get_content_type("word/media/image1.PNG"), Some("image/png"));
        assert_eq!(ct.get_content_type("word/media/image1"), None);
    }

    #[test]
    fn test_xml_is_sorted() {
        let mut ct = ContentTypes::new();
        ct.add_default("png", "image/png");
        ct.add_default("jpeg", "image/jpeg");
        let xml = ct.to_xml();
        let jpeg = xml.find(r#"Extension="jpeg""#).unwrap();
        let png = xml.find(r#"Extension="png""#).unwrap();
        let rels = xml.find(r#"Extension="rels""#).unwrap();
        assert!(jpeg < png && png < rels);
    }
}
