//! Document.xml writer
//!
//! Serializes blocks into the body of `word/document.xml`.

use super::blocks::{ImageBlock, Paragraph, TextRun};
use super::media_writer::{generate_inline_drawing, points_to_emu};
use super::namespaces;
use crate::pdf::{PageSize, MM};
use quick_xml::escape::escape;

/// Page dimensions for the section properties, in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl PageSetup {
    pub fn new(page_size: PageSize, margin_mm: f64) -> Self {
        let twips = |points: f64| (points * 20.0).round().max(0.0) as u32;
        Self {
            width: twips(page_size.width()),
            height: twips(page_size.height()),
            margin: twips(margin_mm * MM),
        }
    }
}

impl Default for PageSetup {
    /// A4 portrait with 20 mm margins
    fn default() -> Self {
        Self::new(PageSize::A4, 20.0)
    }
}

/// Writer for document.xml
#[derive(Debug)]
pub struct DocumentWriter {
    xml: String,
    next_doc_pr_id: u32,
    page: PageSetup,
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new(PageSetup::default())
    }
}

impl DocumentWriter {
    pub fn new(page: PageSetup) -> Self {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}">"#,
            namespaces::W,
            namespaces::R,
            namespaces::WP,
            namespaces::A,
            namespaces::PIC,
        ));
        xml.push_str("<w:body>");

        Self {
            xml,
            next_doc_pr_id: 1,
            page,
        }
    }

    pub fn write_heading(&mut self, text: &str) {
        self.xml
            .push_str(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r>"#);
        self.write_text(text);
        self.xml.push_str("</w:r></w:p>");
    }

    pub fn write_paragraph(&mut self, paragraph: &Paragraph) {
        self.xml.push_str("<w:p>");

        if paragraph.style.is_some() || paragraph.spacing_after.is_some() {
            self.xml.push_str("<w:pPr>");
            if let Some(style) = paragraph.style {
                self.xml
                    .push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style));
            }
            if let Some(after) = paragraph.spacing_after {
                self.xml
                    .push_str(&format!(r#"<w:spacing w:after="{}"/>"#, after));
            }
            self.xml.push_str("</w:pPr>");
        }

        for run in &paragraph.runs {
            self.write_run(run);
        }

        self.xml.push_str("</w:p>");
    }

    /// Write an image in its own paragraph
    pub fn write_image(&mut self, image: &ImageBlock, rel_id: &str) {
        let doc_pr_id = self.next_doc_pr_id;
        self.next_doc_pr_id += 1;

        self.xml.push_str("<w:p><w:r>");
        self.xml.push_str(&generate_inline_drawing(
            rel_id,
            doc_pr_id,
            points_to_emu(image.width_pt),
            points_to_emu(image.height_pt),
            &image.name,
        ));
        self.xml.push_str("</w:r></w:p>");
    }

    /// Close the body with the section properties and return the XML
    pub fn finish(mut self) -> String {
        self.xml.push_str(&format!(
            r#"<w:sectPr><w:pgSz w:w="{w}" w:h="{h}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
            w = self.page.width,
            h = self.page.height,
            m = self.page.margin,
        ));
        self.xml.push_str("</w:body></w:document>");
        self.xml
    }

    fn write_run(&mut self, run: &TextRun) {
        self.xml.push_str("<w:r>");
        self.write_run_properties(run);

        for (i, line) in run.text.split('\n').enumerate() {
            if i > 0 {
                self.xml.push_str("<w:br/>");
            }
            for (j, piece) in line.split('\t').enumerate() {
                if j > 0 {
                    self.xml.push_str("<w:tab/>");
                }
                self.write_text(piece);
            }
        }

        self.xml.push_str("</w:r>");
    }

    fn write_run_properties(&mut self, run: &TextRun) {
        if !run.bold && !run.italic && run.size_half_points.is_none() {
            return;
        }

        self.xml.push_str("<w:rPr>");
        if run.bold {
            self.xml.push_str("<w:b/>");
        }
        if run.italic {
            self.xml.push_str("<w:i/>");
        }
        if let Some(size) = run.size_half_points {
            self.xml
                .push_str(&format!(r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size));
        }
        self.xml.push_str("</w:rPr>");
    }

    fn write_text(&mut self, text: &str) {
        // Control characters are not allowed in XML 1.0
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return;
        }

        let preserve = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
        if preserve {
            self.xml.push_str(r#"<w:t xml:space="preserve">"#);
        } else {
            self.xml.push_str("<w:t>");
        }
        self.xml.push_str(&escape(text.as_str()));
        self.xml.push_str("</w:t>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_codec::ImageFormat;

    fn body(writer: DocumentWriter) -> String {
        let xml = writer.finish();
        let start = xml.find("<w:body>").unwrap();
        xml[start..].to_string()
    }

    #[test]
    fn test_run_properties() {
        let mut writer = DocumentWriter::default();
        writer.write_paragraph(&Paragraph::new(TextRun::new("Jane").bold().with_size(32)));
        let xml = body(writer);
        assert!(xml.contains(r#"<w:r><w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr><w:t>Jane</w:t></w:r>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut writer = DocumentWriter::default();
        writer.write_paragraph(&Paragraph::new(TextRun::new("R&D <team>")));
        assert!(body(writer).contains("<w:t>R&amp;D &lt;team&gt;</w:t>"));
    }

    #[test]
    fn test_line_breaks_and_whitespace() {
        let mut writer = DocumentWriter::default();
        writer.write_paragraph(&Paragraph::new(TextRun::new("one\r\n two\u{7}")));
        let xml = body(writer);
        assert!(xml.contains(r#"<w:t>one</w:t><w:br/><w:t xml:space="preserve"> two</w:t>"#));
    }

    #[test]
    fn test_doc_pr_ids_are_unique() {
        let image = ImageBlock {
            data: vec![0],
            format: ImageFormat::Png,
            width_pt: 10.0,
            height_pt: 5.0,
            name: "Photo".to_string(),
        };
        let mut writer = DocumentWriter::default();
        writer.write_image(&image, "rId3");
        writer.write_image(&image, "rId4");
        let xml = body(writer);
        assert!(xml.contains(r#"<wp:docPr id="1""#));
        assert!(xml.contains(r#"<wp:docPr id="2""#));
        assert!(xml.contains(r#"<wp:extent cx="127000" cy="63500"/>"#));
    }

    #[test]
    fn test_heading_and_spacing() {
        let mut writer = DocumentWriter::default();
        writer.write_heading("Experience");
        writer.write_paragraph(&Paragraph {
            spacing_after: Some(200),
            ..Paragraph::new(TextRun::new("Dev"))
        });
        let xml = body(writer);
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Experience</w:t>"#));
        assert!(xml.contains(r#"<w:pPr><w:spacing w:after="200"/></w:pPr>"#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_page_setup() {
        let a4 = PageSetup::default();
        assert_eq!((a4.width, a4.height, a4.margin), (11906, 16838, 1134));

        let letter = PageSetup::new(PageSize::Letter, 25.4);
        assert_eq!((letter.width, letter.height, letter.margin), (12240, 15840, 1440));
        let xml = DocumentWriter::new(letter).finish();
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#));
    }
}
