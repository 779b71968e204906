//! Integration tests for resume export
//! Both renderers are driven from the same snapshots, and their outputs are
//! checked for the same section order and omission rules.

use proptest::prelude::*;
use resume_export::pdf::{render_pdf, PdfExportOptions};
use resume_export::{
    render_docx, DirectorySaver, DocxExportOptions, ExportFormat, ExportSettings, Exporter,
};
use resume_model::{Certificate, Education, Experience, PersonalInfo, ResumeData};
use std::io::{Cursor, Read};
use tempfile::TempDir;
use zip::ZipArchive;

fn jane_doe() -> ResumeData {
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

fn pdf_text(data: &ResumeData) -> String {
    let options = PdfExportOptions::default().with_compression(false);
    String::from_utf8_lossy(&render_pdf(data, &options).unwrap()).into_owned()
}

fn docx_xml(data: &ResumeData) -> String {
    let bytes = render_docx(data, &DocxExportOptions::default()).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

/// Byte offsets of each needle, panicking when one is missing
fn positions(haystack: &str, needles: &[String]) -> Vec<usize> {
    needles
        .iter()
        .map(|n| {
            haystack
                .find(n.as_str())
                .unwrap_or_else(|| panic!("missing {n}"))
        })
        .collect()
}

#[test]
fn test_jane_doe_both_formats() {
    let data = jane_doe();
    data.validate().unwrap();

    let pdf = pdf_text(&data);
    let docx = docx_xml(&data);

    for text in ["Jane Doe", "jane@x.com", "Summary", "Engineer", "Experience", "Dev", "Built things"] {
        assert!(pdf.contains(&format!("({text}) Tj")), "PDF missing {text}");
        assert!(docx.contains(&format!(">{text}<")), "DOCX missing {text}");
    }
    for heading in ["Education", "Skills", "Projects", "Certificates"] {
        assert!(!pdf.contains(&format!("({heading})")), "PDF has {heading}");
        assert!(!docx.contains(&format!(">{heading}<")), "DOCX has {heading}");
    }
}

#[test]
fn test_exporter_writes_both_files() {
    let temp_dir = TempDir::new().unwrap();
    let exporter = Exporter::new(ExportSettings::default(), DirectorySaver::new(temp_dir.path()));

    for format in ExportFormat::ALL {
        let path = exporter.export(format, &jane_doe()).unwrap();
        assert_eq!(path.file_name().unwrap(), format.filename());
    }

    let pdf = std::fs::read(temp_dir.path().join("resume.pdf")).unwrap();
    let docx = std::fs::read(temp_dir.path().join("resume.docx")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(docx.starts_with(b"PK"));
}

#[test]
fn test_gpa_omitted_when_blank() {
    let mut data = jane_doe();
    data.education = vec![
        Education {
            institution: "MIT".to_string(),
            degree: "BSc".to_string(),
            gpa: Some("  ".to_string()),
            ..Default::default()
        },
        Education {
            institution: "CMU".to_string(),
            degree: "MSc".to_string(),
            gpa: Some("3.9".to_string()),
            ..Default::default()
        },
    ];

    let pdf = pdf_text(&data);
    let docx = docx_xml(&data);
    assert_eq!(pdf.matches("GPA:").count(), 1);
    assert_eq!(docx.matches("GPA:").count(), 1);
    assert!(pdf.contains("(GPA: 3.9) Tj"));
}

#[test]
fn test_certificate_without_image() {
    let mut data = jane_doe();
    data.certificates = vec![Certificate {
        name: "AWS".to_string(),
        issuer: "Amazon".to_string(),
        date: "2023".to_string(),
        file_url: None,
    }];

    let pdf = pdf_text(&data);
    let docx = docx_xml(&data);
    assert!(pdf.contains("(Certificates) Tj"));
    assert!(pdf.contains("(Amazon | 2023) Tj"));
    assert!(!pdf.contains("/Subtype /Image"));
    assert!(docx.contains(">Amazon | 2023<"));
    assert!(!docx.contains("<w:drawing>"));
}

#[test]
fn test_empty_skills_suppressed() {
    let mut data = jane_doe();
    data.skills = vec![String::new(), "   ".to_string()];
    assert!(!pdf_text(&data).contains("(Skills)"));
    assert!(!docx_xml(&data).contains(">Skills<"));

    data.skills = vec!["Rust".to_string(), "SQL".to_string()];
    assert!(pdf_text(&data).contains("(Rust, SQL) Tj"));
    assert!(docx_xml(&data).contains(">Rust, SQL<"));
}

#[test]
fn test_bad_images_do_not_fail_export() {
    let mut data = jane_doe();
    data.profile_image = Some("not-a-data-uri".to_string());
    data.certificates = vec![Certificate {
        name: "Scan".to_string(),
        file_url: Some("data:image/png;base64,aGVsbG8=".to_string()),
        ..Default::default()
    }];

    let pdf = pdf_text(&data);
    let docx = docx_xml(&data);
    assert!(pdf.contains("(Jane Doe) Tj"));
    assert!(pdf.contains("(Scan) Tj"));
    assert!(docx.contains(">Scan<"));
    assert!(!docx.contains("<w:drawing>"));
}

#[test]
fn test_exports_are_idempotent() {
    let mut data = jane_doe();
    data.skills = vec!["Rust".to_string()];
    let pdf_options = PdfExportOptions::default();
    let docx_options = DocxExportOptions::default();

    assert_eq!(
        render_pdf(&data, &pdf_options).unwrap(),
        render_pdf(&data, &pdf_options).unwrap()
    );
    assert_eq!(
        render_docx(&data, &docx_options).unwrap(),
        render_docx(&data, &docx_options).unwrap()
    );
}

#[test]
fn test_long_resume_spans_pages() {
    let mut data = jane_doe();
    data.experience = (0..40)
        .map(|i| Experience {
            company: format!("Company {i}"),
            position: format!("Role {i}"),
            start_date: "2010".to_string(),
            end_date: String::new(),
            description: "Maintained a large distributed system. ".repeat(6),
        })
        .collect();

    let pdf = pdf_text(&data);
    assert!(!pdf.contains("/Count 1\n") && !pdf.contains("/Count 1 "));
    assert!(pdf.contains("(Role 39) Tj"));
    assert!(pdf.contains("(Company 39 | 2010 - Present) Tj"));
}

fn experience_in_order(order: &[usize]) -> ResumeData {
    let mut data = jane_doe();
    data.experience = order
        .iter()
        .map(|i| Experience {
            company: format!("Company{i}"),
            position: format!("Position{i}"),
            ..Default::default()
        })
        .collect();
    data
}

proptest! {
    #[test]
    fn prop_experience_order_preserved(
        order in Just((0..6).collect::<Vec<usize>>()).prop_shuffle()
    ) {
        let data = experience_in_order(&order);

        let pdf_needles: Vec<String> = order.iter().map(|i| format!("(Position{i}) Tj")).collect();
        let pdf = positions(&pdf_text(&data), &pdf_needles);
        prop_assert!(pdf.windows(2).all(|w| w[0] < w[1]));

        let docx_needles: Vec<String> = order.iter().map(|i| format!(">Position{i}<")).collect();
        let docx = positions(&docx_xml(&data), &docx_needles);
        prop_assert!(docx.windows(2).all(|w| w[0] < w[1]));
    }
}
