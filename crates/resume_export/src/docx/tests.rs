//! End-to-end tests for DOCX export

use super::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use resume_model::{Certificate, Experience, PersonalInfo, Project, ResumeData};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const PNG_1X1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

fn create_basic_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "1234567890".to_string(),
            location: "NYC".to_string(),
            summary: "Engineer".to_string(),
        },
        experience: vec![Experience {
            company: "Acme".to_string(),
            position: "Dev".to_string(),
            start_date: "2020".to_string(),
            end_date: "2022".to_string(),
            description: "Built things".to_string(),
        }],
        ..Default::default()
    }
}

fn render(data: &ResumeData) -> Vec<u8> {
    render_docx(data, &DocxExportOptions::default()).unwrap()
}

fn read_bytes(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).ok()?;
    let mut content = Vec::new();
    part.read_to_end(&mut content).unwrap();
    Some(content)
}

fn read_part(bytes: &[u8], name: &str) -> Option<String> {
    read_bytes(bytes, name).map(|content| String::from_utf8(content).unwrap())
}

fn document_xml(bytes: &[u8]) -> String {
    read_part(bytes, "word/document.xml").unwrap()
}

/// Text of every non-empty paragraph, with `<w:br/>` read back as `\n`
fn paragraphs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"w:p" => current.clear(),
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current))
            }
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::Text(t) if in_text => current.push_str(&t.unescape().unwrap()),
            Event::Empty(e) if e.name().as_ref() == b"w:br" => current.push('\n'),
            Event::Eof => break,
            _ => {}
        }
    }

    paragraphs.retain(|p| !p.is_empty());
    paragraphs
}

#[test]
fn test_export_basic_docx() {
    let bytes = render(&create_basic_resume());
    assert!(bytes.starts_with(b"PK"));
    assert!(read_part(&bytes, "word/styles.xml").is_some());
    assert!(read_bytes(&bytes, "word/media/image1.png").is_none());
}

#[test]
fn test_basic_resume_paragraphs() {
    let bytes = render(&create_basic_resume());
    assert_eq!(
        paragraphs(&document_xml(&bytes)),
        vec![
            "Jane Doe",
            "jane@x.com",
            "1234567890",
            "NYC",
            "Summary",
            "Engineer",
            "Experience",
            "Dev",
            "Acme | 2020 - 2022",
            "Built things",
        ]
    );
}

#[test]
fn test_name_and_contact_sizes() {
    let xml = document_xml(&render(&create_basic_resume()));
    assert!(xml.contains(r#"<w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr><w:t>Jane Doe</w:t>"#));
    assert!(xml.contains(r#"<w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr><w:t>jane@x.com</w:t>"#));
}

#[test]
fn test_projects_and_skills_included() {
    let data = ResumeData {
        skills: vec!["Rust".to_string(), " ".to_string(), "SQL".to_string()],
        projects: vec![Project {
            name: "Resume Builder".to_string(),
            technologies: "Rust".to_string(),
            link: Some("https://example.com".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let texts = paragraphs(&document_xml(&render(&data)));
    assert_eq!(
        texts,
        vec![
            "Skills",
            "Rust, SQL",
            "Projects",
            "Resume Builder",
            "Technologies: Rust",
            "Link: https://example.com",
        ]
    );
}

#[test]
fn test_multiline_description() {
    let mut data = create_basic_resume();
    data.experience[0].description = "Led team\nShipped v2".to_string();
    let texts = paragraphs(&document_xml(&render(&data)));
    assert!(texts.contains(&"Led team\nShipped v2".to_string()));
}

#[test]
fn test_certificate_image_embedded() {
    let data = ResumeData {
        certificates: vec![Certificate {
            name: "AWS".to_string(),
            issuer: "Amazon".to_string(),
            date: "2023".to_string(),
            file_url: Some(PNG_1X1.to_string()),
        }],
        ..Default::default()
    };
    let bytes = render(&data);

    let media = read_bytes(&bytes, "word/media/image1.png").unwrap();
    assert!(media.starts_with(b"\x89PNG\r\n\x1a\n"));
    let types = read_part(&bytes, "[Content_Types].xml").unwrap();
    assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    let rels = read_part(&bytes, "word/_rels/document.xml.rels").unwrap();
    assert!(rels.contains(r#"Id="rId3""#));
    assert!(rels.contains(r#"Target="media/image1.png""#));

    let xml = document_xml(&bytes);
    assert!(xml.contains(r#"<a:blip r:embed="rId3"/>"#));
    assert_eq!(paragraphs(&xml), vec!["Certificates", "AWS", "Amazon | 2023"]);
}

#[test]
fn test_profile_image_precedes_name() {
    let mut data = create_basic_resume();
    data.profile_image = Some(PNG_1X1.to_string());
    let xml = document_xml(&render(&data));
    let drawing = xml.find("<w:drawing>").unwrap();
    let name = xml.find("Jane Doe").unwrap();
    assert!(drawing < name);
    assert!(xml.contains(r#"<wp:docPr id="1" name="Profile photo""#));
}

#[test]
fn test_invalid_images_are_skipped() {
    let mut data = create_basic_resume();
    data.profile_image = Some("not-a-data-uri".to_string());
    data.certificates = vec![Certificate {
        name: "Broken".to_string(),
        file_url: Some("data:image/png;base64,@@@".to_string()),
        ..Default::default()
    }];

    let bytes = render(&data);
    let xml = document_xml(&bytes);
    assert!(!xml.contains("<w:drawing>"));
    assert!(read_bytes(&bytes, "word/media/image1.png").is_none());
    assert!(paragraphs(&xml).contains(&"Broken".to_string()));
}

#[test]
fn test_rendering_is_deterministic() {
    let mut data = create_basic_resume();
    data.profile_image = Some(PNG_1X1.to_string());
    assert_eq!(render(&data), render(&data));
}

#[test]
fn test_empty_resume_is_valid_package() {
    let bytes = render(&ResumeData::default());
    assert!(paragraphs(&document_xml(&bytes)).is_empty());
}

#[test]
fn test_page_size_follows_options() {
    let data = create_basic_resume();
    let a4 = document_xml(&render(&data));
    assert!(a4.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));

    let options = DocxExportOptions::default().with_page_size(crate::pdf::PageSize::Letter);
    let letter = document_xml(&render_docx(&data, &options).unwrap());
    assert!(letter.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    assert!(letter.contains(r#"w:left="1134""#));
}
