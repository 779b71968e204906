//! Absolute-coordinate resume layout
//!
//! Each step takes the cursor it starts at and returns the cursor it leaves
//! behind, so sections can be laid out and tested in isolation.

use super::canvas::{LayoutCursor, PdfCanvas};
use super::fonts::StandardFont;
use super::images::PdfImage;
use super::options::{ImageBox, PdfExportOptions, MM};
use super::wrap::wrap_text;
use crate::image_codec::decode_data_uri;
use crate::outline::{OutlineEntry, OutlineHeader, OutlineSection, ResumeOutline};
use tracing::{debug, warn};

/// Layout metrics in points, resolved from the export options
#[derive(Debug, Clone)]
pub struct Metrics {
    pub margin: f64,
    pub content_width: f64,
    pub line_height: f64,
    pub list_heading_step: f64,
    pub text_heading_step: f64,
    pub entry_gap: f64,
    pub section_gap: f64,
    pub name_size: f64,
    pub heading_size: f64,
    pub body_size: f64,
    pub profile_image: (f64, f64),
    pub certificate_image: (f64, f64),
}

impl Metrics {
    pub fn from_options(options: &PdfExportOptions) -> Self {
        let to_pt = |b: ImageBox| (b.width * MM, b.height * MM);
        Self {
            margin: options.margin_mm * MM,
            content_width: options.content_width(),
            line_height: options.line_height_mm * MM,
            list_heading_step: options.list_heading_step_mm * MM,
            text_heading_step: options.text_heading_step_mm * MM,
            entry_gap: options.entry_gap_mm * MM,
            section_gap: options.section_gap_mm * MM,
            name_size: options.name_size,
            heading_size: options.heading_size,
            body_size: options.body_size,
            profile_image: to_pt(options.profile_image),
            certificate_image: to_pt(options.certificate_image),
        }
    }
}

/// Lay out a whole resume onto a fresh canvas
pub fn layout_resume(outline: &ResumeOutline<'_>, options: &PdfExportOptions) -> PdfCanvas {
    let metrics = Metrics::from_options(options);
    let mut canvas = PdfCanvas::new(options.page_size, metrics.margin);

    let top = canvas.top();
    let mut cursor = layout_header(&mut canvas, top, &outline.header, &metrics);
    for section in &outline.sections {
        cursor = layout_section(&mut canvas, cursor, section, &metrics);
    }

    debug!(
        pages = canvas.pages().len(),
        images = canvas.images().len(),
        "PDF layout complete"
    );
    canvas
}

/// Baseline-to-baseline distance for a wrapped name, as a multiple of its size
const NAME_LEADING: f64 = 1.2;

/// Photo, name and contact block
pub fn layout_header(
    canvas: &mut PdfCanvas,
    cursor: LayoutCursor,
    header: &OutlineHeader<'_>,
    m: &Metrics,
) -> LayoutCursor {
    let name_font = StandardFont::HelveticaBold;
    let name_step = m.name_size * NAME_LEADING;
    let mut cursor = cursor;

    let photo = header
        .profile_image
        .and_then(|uri| embed_image(canvas, uri, "profile image"));

    match photo {
        Some(image) => {
            let (width, height) = m.profile_image;
            cursor = canvas.draw_image(cursor, m.margin, width, height, image);
            let name_x = m.margin + width + 10.0 * MM;
            let name_at = LayoutCursor {
                y: cursor.y + 15.0 * MM,
                ..cursor
            };
            let Wrapped { last, .. } = draw_wrapped(
                canvas,
                name_at,
                TextStyle::new(name_x, name_font, m.name_size, m.content_width - width - 10.0 * MM),
                name_step,
                header.name,
            );

            let below_photo = LayoutCursor {
                y: cursor.y + height,
                ..cursor
            };
            cursor = match last {
                Some(last) => lower(
                    below_photo,
                    LayoutCursor {
                        y: last.y + PdfCanvas::text_descent(m.name_size),
                        ..last
                    },
                ),
                None => below_photo,
            };
            cursor.y += 5.0 * MM;
        }
        None => {
            let style = TextStyle::new(m.margin, name_font, m.name_size, m.content_width);
            if let Some(last) = draw_wrapped(canvas, cursor, style, name_step, header.name).last {
                cursor = last;
            }
            cursor.y += 10.0 * MM;
        }
    }

    if !header.contact.is_empty() {
        let style = TextStyle::new(m.margin, StandardFont::Helvetica, m.body_size, m.content_width);
        for line in &header.contact {
            cursor = draw_wrapped(canvas, cursor, style, m.line_height, line).next;
        }
        cursor.y += 10.0 * MM;
    }
    cursor
}

/// Heading followed by every entry of the section
pub fn layout_section(
    canvas: &mut PdfCanvas,
    cursor: LayoutCursor,
    section: &OutlineSection<'_>,
    m: &Metrics,
) -> LayoutCursor {
    let step = if section.kind.is_list() {
        m.list_heading_step
    } else {
        m.text_heading_step
    };

    // Keep the heading on the same page as the first line below it
    let keep = step + m.line_height + PdfCanvas::text_descent(m.body_size);
    let mut cursor = canvas.reserve(cursor, keep);
    cursor = canvas.draw_text(
        cursor,
        m.margin,
        StandardFont::HelveticaBold,
        m.heading_size,
        section.heading(),
    );
    cursor.y += step;

    for entry in &section.entries {
        cursor = layout_entry(canvas, cursor, entry, m);
    }
    cursor.y += m.section_gap;
    cursor
}

/// Bold title, italic subtitles, wrapped body, then the optional image
pub fn layout_entry(
    canvas: &mut PdfCanvas,
    cursor: LayoutCursor,
    entry: &OutlineEntry<'_>,
    m: &Metrics,
) -> LayoutCursor {
    let mut cursor = cursor;
    let lines = |canvas: &mut PdfCanvas, cursor: LayoutCursor, font: StandardFont, text: &str| {
        let style = TextStyle::new(m.margin, font, m.body_size, m.content_width);
        draw_wrapped(canvas, cursor, style, m.line_height, text).next
    };

    if let Some(title) = &entry.title {
        cursor = lines(canvas, cursor, StandardFont::HelveticaBold, title);
    }
    for subtitle in &entry.subtitles {
        cursor = lines(canvas, cursor, StandardFont::HelveticaOblique, subtitle);
    }
    if let Some(body) = &entry.body {
        cursor = lines(canvas, cursor, StandardFont::Helvetica, body);
    }

    if let Some(uri) = entry.image {
        if let Some(image) = embed_image(canvas, uri, "certificate image") {
            let (width, height) = m.certificate_image;
            cursor = canvas.draw_image(cursor, m.margin, width, height, image);
            cursor.y += height + m.line_height;
        }
    }

    cursor.y += m.entry_gap;
    cursor
}

/// Where and how a block of wrapped text is drawn
#[derive(Debug, Clone, Copy)]
struct TextStyle {
    x: f64,
    font: StandardFont,
    size: f64,
    max_width: f64,
}

impl TextStyle {
    fn new(x: f64, font: StandardFont, size: f64, max_width: f64) -> Self {
        Self {
            x,
            font,
            size,
            max_width,
        }
    }
}

struct Wrapped {
    /// Baseline of the last line drawn, if any
    last: Option<LayoutCursor>,
    /// One step below the last line
    next: LayoutCursor,
}

/// Wrap `text` to the style's width and draw it one line per `step`
fn draw_wrapped(
    canvas: &mut PdfCanvas,
    cursor: LayoutCursor,
    style: TextStyle,
    step: f64,
    text: &str,
) -> Wrapped {
    let mut next = cursor;
    let mut last = None;
    for line in wrap_text(text, style.font, style.size, style.max_width) {
        let placed = canvas.draw_text(next, style.x, style.font, style.size, &line);
        last = Some(placed);
        next = LayoutCursor {
            y: placed.y + step,
            ..placed
        };
    }
    Wrapped { last, next }
}

/// Whichever of two cursors sits further down the document
fn lower(a: LayoutCursor, b: LayoutCursor) -> LayoutCursor {
    if (b.page, b.y) > (a.page, a.y) {
        b
    } else {
        a
    }
}

/// Decode and pool an image, logging and skipping it on any failure
fn embed_image(canvas: &mut PdfCanvas, uri: &str, what: &str) -> Option<usize> {
    let bytes = match decode_data_uri(uri) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Skipping {}: not a decodable data URI", what);
            return None;
        }
    };
    match PdfImage::from_bytes(&bytes) {
        Ok(image) => Some(canvas.add_image(image)),
        Err(e) => {
            warn!(error = %e, "Skipping {}: cannot embed image data", what);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SectionKind;
    use crate::pdf::canvas::DrawItem;

    const PNG_1X1: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    fn metrics() -> Metrics {
        Metrics::from_options(&PdfExportOptions::default())
    }

    fn header<'a>(image: Option<&'a str>) -> OutlineHeader<'a> {
        OutlineHeader {
            name: "Jane Doe",
            contact: vec!["jane@x.com", "1234567890", "NYC"],
            profile_image: image,
        }
    }

    #[test]
    fn test_header_without_image() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let top = canvas.top();
        let cursor = layout_header(&mut canvas, top, &header(None), &m);

        let expected = m.margin + 10.0 * MM + 3.0 * m.line_height + 10.0 * MM;
        assert!((cursor.y - expected).abs() < 1e-9);
        let texts: Vec<_> = canvas.pages()[0].texts().collect();
        assert_eq!(texts, vec!["Jane Doe", "jane@x.com", "1234567890", "NYC"]);
    }

    #[test]
    fn test_bad_profile_image_is_skipped() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let top = canvas.top();
        let with_bad = layout_header(&mut canvas, top, &header(Some("not-a-data-uri")), &m);
        assert_eq!(canvas.images().len(), 0);
        assert_eq!(canvas.pages()[0].image_count(), 0);

        let mut plain = PdfCanvas::new(Default::default(), m.margin);
        let top = plain.top();
        assert_eq!(with_bad, layout_header(&mut plain, top, &header(None), &m));
    }

    #[test]
    fn test_entry_advances_per_line() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let entry = OutlineEntry {
            title: Some("Dev".to_string()),
            subtitles: vec!["Acme | 2020 - 2022".to_string()],
            body: Some("Built things".to_string()),
            image: None,
        };
        let start = LayoutCursor { page: 0, y: 100.0 };
        let end = layout_entry(&mut canvas, start, &entry, &m);
        let expected = 100.0 + 3.0 * m.line_height + m.entry_gap;
        assert!((end.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_heading_is_kept_with_first_line() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let section = OutlineSection {
            kind: SectionKind::Experience,
            entries: vec![OutlineEntry {
                title: Some("Dev".to_string()),
                ..Default::default()
            }],
        };
        // Room for the heading itself but not for the line after it
        let start = LayoutCursor {
            page: 0,
            y: canvas.bottom() - m.list_heading_step,
        };
        layout_section(&mut canvas, start, &section, &m);

        assert_eq!(canvas.pages().len(), 2);
        assert_eq!(canvas.pages()[0].texts().count(), 0);
        assert_eq!(canvas.pages()[1].texts().collect::<Vec<_>>(), vec!["Experience", "Dev"]);
    }

    #[test]
    fn test_long_body_flows_onto_new_pages() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let body = "lorem ipsum dolor sit amet ".repeat(400);
        let entry = OutlineEntry {
            body: Some(body),
            ..Default::default()
        };
        let top = canvas.top();
        let end = layout_entry(&mut canvas, top, &entry, &m);

        assert!(canvas.pages().len() > 1);
        assert_eq!(end.page, canvas.pages().len() - 1);
        for page in canvas.pages() {
            for item in &page.items {
                if let DrawItem::Text { y, size, .. } = item {
                    assert!(y + PdfCanvas::text_descent(*size) <= canvas.bottom() + 1e-9);
                }
            }
        }
    }

    fn assert_within_margins(canvas: &PdfCanvas, m: &Metrics) {
        let right = m.margin + m.content_width;
        for page in canvas.pages() {
            for item in &page.items {
                if let DrawItem::Text { x, font, size, text, .. } = item {
                    let end = x + font.text_width(text, *size);
                    assert!(end <= right + 1e-6, "{text:?} ends at {end}, past {right}");
                }
            }
        }
    }

    #[test]
    fn test_long_lines_stay_inside_margins() {
        let m = metrics();
        let name = "Maximiliana Alexandrovna Konstantinopoulou-Fitzgerald";
        let email = format!("{}@example.com", "someone.with.a.remarkably.long.mailbox".repeat(3));
        let title = "Distributed Streaming Analytics Platform ".repeat(3) + "for Realtime Metrics";

        for photo in [None, Some(PNG_1X1)] {
            let mut canvas = PdfCanvas::new(Default::default(), m.margin);
            let header = OutlineHeader {
                name,
                contact: vec![email.as_str()],
                profile_image: photo,
            };
            let top = canvas.top();
            let cursor = layout_header(&mut canvas, top, &header, &m);
            let entry = OutlineEntry {
                title: Some(title.clone()),
                ..Default::default()
            };
            layout_entry(&mut canvas, cursor, &entry, &m);

            assert_eq!(canvas.images().len(), usize::from(photo.is_some()));
            assert_within_margins(&canvas, &m);
            let title_lines = canvas.pages()[0]
                .texts()
                .filter(|t| t.contains("Distributed"))
                .count();
            assert!(title_lines > 1);
            assert!(canvas.pages()[0].texts().count() > 4);
        }
    }

    #[test]
    fn test_header_with_image() {
        let m = metrics();
        let mut canvas = PdfCanvas::new(Default::default(), m.margin);
        let top = canvas.top();
        let cursor = layout_header(&mut canvas, top, &header(Some(PNG_1X1)), &m);

        let (width, height) = m.profile_image;
        let expected = m.margin + height + 5.0 * MM + 3.0 * m.line_height + 10.0 * MM;
        assert!((cursor.y - expected).abs() < 1e-9);
        assert_eq!(canvas.pages()[0].image_count(), 1);
        let name_x = canvas.pages()[0].items.iter().find_map(|item| match item {
            DrawItem::Text { x, text, .. } if text == "Jane Doe" => Some(*x),
            _ => None,
        });
        assert_eq!(name_x, Some(m.margin + width + 10.0 * MM));
    }
}
