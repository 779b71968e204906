//! Format-independent resume outline
//!
//! The outline fixes section order, entry composition and the rules for
//! leaving out empty sections and absent optional fields. The PDF and DOCX
//! renderers only decide how an outline looks on the page.

use resume_model::{Certificate, Education, Experience, Project, ResumeData};

/// Sections in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certificates,
}

impl SectionKind {
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Certificates => "Certificates",
        }
    }

    /// List sections repeat titled entries; the others hold a single text block
    pub fn is_list(&self) -> bool {
        !matches!(self, SectionKind::Summary | SectionKind::Skills)
    }
}

/// Name, contact lines and optional photo
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineHeader<'a> {
    pub name: &'a str,
    pub contact: Vec<&'a str>,
    /// Data-URI of the profile photo
    pub profile_image: Option<&'a str>,
}

/// One entry of a section.
///
/// Renderers show the title in bold, each subtitle line in italics, then the
/// wrapped body, then the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineEntry<'a> {
    pub title: Option<String>,
    pub subtitles: Vec<String>,
    pub body: Option<String>,
    pub image: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSection<'a> {
    pub kind: SectionKind,
    pub entries: Vec<OutlineEntry<'a>>,
}

impl OutlineSection<'_> {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeOutline<'a> {
    pub header: OutlineHeader<'a>,
    pub sections: Vec<OutlineSection<'a>>,
}

impl<'a> ResumeOutline<'a> {
    pub fn from_resume(data: &'a ResumeData) -> Self {
        let info = &data.personal_info;
        let header = OutlineHeader {
            name: info.full_name.trim(),
            contact: info.contact_lines(),
            profile_image: data.profile_image(),
        };

        let mut sections = Vec::new();
        let mut push = |kind, entries: Vec<OutlineEntry<'a>>| {
            if !entries.is_empty() {
                sections.push(OutlineSection { kind, entries });
            }
        };

        push(
            SectionKind::Summary,
            text_entry(&info.summary).into_iter().collect(),
        );
        push(
            SectionKind::Experience,
            data.experience.iter().map(experience_entry).collect(),
        );
        push(
            SectionKind::Education,
            data.education.iter().map(education_entry).collect(),
        );
        push(
            SectionKind::Skills,
            text_entry(&data.skill_list().join(", ")).into_iter().collect(),
        );
        push(
            SectionKind::Projects,
            data.projects.iter().map(project_entry).collect(),
        );
        push(
            SectionKind::Certificates,
            data.certificates.iter().map(certificate_entry).collect(),
        );

        Self { header, sections }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&OutlineSection<'a>> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// `start - end`, with an open end shown as `Present`
pub fn date_range(start: &str, end: &str) -> Option<String> {
    match (start.trim(), end.trim()) {
        ("", "") => None,
        (start, "") => Some(format!("{start} - Present")),
        ("", end) => Some(end.to_string()),
        (start, end) => Some(format!("{start} - {end}")),
    }
}

fn join_non_blank(parts: &[&str], sep: &str) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(sep))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn text_entry<'a>(text: &str) -> Option<OutlineEntry<'a>> {
    non_blank(text).map(|body| OutlineEntry {
        body: Some(body),
        ..Default::default()
    })
}

fn experience_entry<'a>(exp: &Experience) -> OutlineEntry<'a> {
    let range = date_range(&exp.start_date, &exp.end_date).unwrap_or_default();
    OutlineEntry {
        title: non_blank(&exp.position),
        subtitles: join_non_blank(&[exp.company.as_str(), range.as_str()], " | ")
            .into_iter()
            .collect(),
        body: non_blank(&exp.description),
        image: None,
    }
}

fn education_entry<'a>(edu: &Education) -> OutlineEntry<'a> {
    let degree = match (edu.degree.trim(), edu.field.trim()) {
        (degree, "") => non_blank(degree),
        ("", field) => Some(field.to_string()),
        (degree, field) => Some(format!("{degree} in {field}")),
    };

    let subtitles = degree
        .into_iter()
        .chain(date_range(&edu.start_date, &edu.end_date))
        .chain(edu.gpa_text().map(|gpa| format!("GPA: {gpa}")))
        .collect();

    OutlineEntry {
        title: non_blank(&edu.institution),
        subtitles,
        body: None,
        image: None,
    }
}

fn project_entry<'a>(project: &Project) -> OutlineEntry<'a> {
    let subtitles = non_blank(&project.technologies)
        .map(|t| format!("Technologies: {t}"))
        .into_iter()
        .chain(project.link_text().map(|link| format!("Link: {link}")))
        .collect();

    OutlineEntry {
        title: non_blank(&project.name),
        subtitles,
        body: non_blank(&project.description),
        image: None,
    }
}

fn certificate_entry(cert: &Certificate) -> OutlineEntry<'_> {
    OutlineEntry {
        title: non_blank(&cert.name),
        subtitles: join_non_blank(&[cert.issuer.as_str(), cert.date.as_str()], " | ")
            .into_iter()
            .collect(),
        body: None,
        image: cert.file_url(),
    }
}
