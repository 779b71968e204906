//! Styles.xml writer
//!
//! Only the styles the resume blocks refer to are defined: `Normal`,
//! `Title` for the name and `Heading1` for section headings.

use super::namespaces;

/// Writer for styles.xml
#[derive(Debug, Clone, Copy)]
pub struct StylesWriter {
    /// Default run size in half-points
    body_size: u32,
}

impl StylesWriter {
    pub fn new(body_size: u32) -> Self {
        Self { body_size }
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));

        self.write_doc_defaults(&mut xml);

        xml.push_str(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        );
        xml.push_str(
            r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="120"/></w:pPr></w:style>"#,
        );
        // Headings stay on the page of the paragraph that follows them
        xml.push_str(
            r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style>"#,
        );

        xml.push_str("</w:styles>");
        xml
    }

    fn write_doc_defaults(&self, xml: &mut String) {
        xml.push_str("<w:docDefaults>");

        xml.push_str("<w:rPrDefault>");
        xml.push_str("<w:rPr>");
        xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, self.body_size));
        xml.push_str(&format!(r#"<w:szCs w:val="{}"/>"#, self.body_size));
        xml.push_str("</w:rPr>");
        xml.push_str("</w:rPrDefault>");

        xml.push_str("<w:pPrDefault>");
        xml.push_str("<w:pPr>");
        xml.push_str(r#"<w:spacing w:after="0" w:line="259" w:lineRule="auto"/>"#);
        xml.push_str("</w:pPr>");
        xml.push_str("</w:pPrDefault>");

        xml.push_str("</w:docDefaults>");
    }
}

/// Generate settings.xml content
pub fn settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{}"><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        namespaces::W
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_defined() {
        let xml = StylesWriter::new(22).write();
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        for id in ["Normal", "Title", "Heading1"] {
            assert!(xml.contains(&format!(r#"w:styleId="{id}""#)), "missing {id}");
        }
        assert!(xml.contains("<w:keepNext/>"));
    }
}
