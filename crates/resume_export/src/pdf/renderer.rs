//! Layout to PDF Conversion
//!
//! Converts the draw calls of a page, measured from the top-left corner,
//! into a content stream in PDF user space, whose origin is bottom-left.

use super::canvas::{DrawItem, PageDraw};
use super::content::ContentStream;
use super::fonts::encode_win_ansi;

/// Resource name of the image at `index` in the canvas pool
pub fn image_resource_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

pub struct PageRenderer {
    page_height: f64,
}

impl PageRenderer {
    pub fn new(page_height: f64) -> Self {
        Self { page_height }
    }

    pub fn render(&self, page: &PageDraw) -> ContentStream {
        let mut stream = ContentStream::new();
        for item in &page.items {
            match item {
                DrawItem::Text {
                    x,
                    y,
                    font,
                    size,
                    text,
                } => {
                    stream
                        .begin_text()
                        .set_font(font.resource_name(), *size)
                        .move_text(*x, self.page_height - y)
                        .show_text(&encode_win_ansi(text))
                        .end_text();
                }
                DrawItem::Image {
                    x,
                    y,
                    width,
                    height,
                    image,
                } => {
                    // Layout gives the top edge; PDF wants the lower-left corner
                    let bottom = self.page_height - y - height;
                    stream.draw_image(&image_resource_name(*image), *x, bottom, *width, *height);
                }
            }
        }
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fonts::StandardFont;

    #[test]
    fn test_text_y_is_flipped() {
        let page = PageDraw {
            items: vec![DrawItem::Text {
                x: 50.0,
                y: 100.0,
                font: StandardFont::HelveticaBold,
                size: 14.0,
                text: "Summary".to_string(),
            }],
        };
        let stream = PageRenderer::new(800.0).render(&page);
        let text = String::from_utf8_lossy(stream.as_bytes()).into_owned();
        assert!(text.contains("/F2 14 Tf"));
        assert!(text.contains("50 700 Td"));
        assert!(text.contains("(Summary) Tj"));
    }

    #[test]
    fn test_image_uses_lower_left_corner() {
        let page = PageDraw {
            items: vec![DrawItem::Image {
                x: 50.0,
                y: 100.0,
                width: 80.0,
                height: 40.0,
                image: 0,
            }],
        };
        let stream = PageRenderer::new(800.0).render(&page);
        let text = String::from_utf8_lossy(stream.as_bytes()).into_owned();
        assert!(text.contains("80 0 0 40 50 660 cm"));
        assert!(text.contains("/Im1 Do"));
    }
}
