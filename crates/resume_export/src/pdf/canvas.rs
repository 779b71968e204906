//! Paged drawing surface
//!
//! Layout code places text and images with absolute coordinates measured in
//! points from the top-left corner of a page. The canvas owns the pages and
//! the image pool, and decides when the vertical cursor has to move onto a
//! fresh page.

use super::fonts::{FontSet, StandardFont};
use super::images::PdfImage;
use super::options::PageSize;

/// Share of the font size that hangs below the baseline
const DESCENT_RATIO: f64 = 0.21;

/// Position of the vertical cursor: page index plus distance from the top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    /// One line of text; `y` is the baseline
    Text {
        x: f64,
        y: f64,
        font: StandardFont,
        size: f64,
        text: String,
    },
    /// An image from the canvas pool; `y` is the top edge
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: usize,
    },
}

/// Draw calls of one page, in painting order
#[derive(Debug, Clone, Default)]
pub struct PageDraw {
    pub items: Vec<DrawItem>,
}

impl PageDraw {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Text { text, .. } => Some(text.as_str()),
            DrawItem::Image { .. } => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, DrawItem::Image { .. }))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct PdfCanvas {
    page_size: PageSize,
    margin: f64,
    pages: Vec<PageDraw>,
    images: Vec<PdfImage>,
    fonts: FontSet,
}

impl PdfCanvas {
    /// Canvas with a single empty page
    pub fn new(page_size: PageSize, margin: f64) -> Self {
        Self {
            page_size,
            margin,
            pages: vec![PageDraw::default()],
            images: Vec::new(),
            fonts: FontSet::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Width between the side margins
    pub fn content_width(&self) -> f64 {
        self.page_size.width() - 2.0 * self.margin
    }

    /// Cursor at the top margin of the first page
    pub fn top(&self) -> LayoutCursor {
        LayoutCursor {
            page: 0,
            y: self.margin,
        }
    }

    /// Lowest y that content may reach
    pub fn bottom(&self) -> f64 {
        self.page_size.height() - self.margin
    }

    /// Make room for content extending `height` below the cursor.
    ///
    /// When it would cross the bottom margin the cursor moves to the top of
    /// a new page. Content taller than a whole page is placed anyway.
    pub fn reserve(&mut self, cursor: LayoutCursor, height: f64) -> LayoutCursor {
        let at_top = (cursor.y - self.margin).abs() < f64::EPSILON;
        if cursor.y + height <= self.bottom() || at_top {
            return cursor;
        }
        self.pages.push(PageDraw::default());
        LayoutCursor {
            page: self.pages.len() - 1,
            y: self.margin,
        }
    }

    /// Extent below a baseline that a line of text at `size` occupies
    pub fn text_descent(size: f64) -> f64 {
        size * DESCENT_RATIO
    }

    /// Draw a line of text with its baseline at the cursor, breaking the page
    /// first if the line would cross the bottom margin.
    pub fn draw_text(
        &mut self,
        cursor: LayoutCursor,
        x: f64,
        font: StandardFont,
        size: f64,
        text: &str,
    ) -> LayoutCursor {
        let cursor = self.reserve(cursor, Self::text_descent(size));
        self.fonts.insert(font);
        self.push(
            cursor.page,
            DrawItem::Text {
                x,
                y: cursor.y,
                font,
                size,
                text: text.to_string(),
            },
        );
        cursor
    }

    /// Add an image to the pool, returning its index
    pub fn add_image(&mut self, image: PdfImage) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    /// Draw a pooled image with its top edge at the cursor
    pub fn draw_image(
        &mut self,
        cursor: LayoutCursor,
        x: f64,
        width: f64,
        height: f64,
        image: usize,
    ) -> LayoutCursor {
        let cursor = self.reserve(cursor, height);
        self.push(
            cursor.page,
            DrawItem::Image {
                x,
                y: cursor.y,
                width,
                height,
                image,
            },
        );
        cursor
    }

    fn push(&mut self, page: usize, item: DrawItem) {
        if let Some(page) = self.pages.get_mut(page) {
            page.items.push(item);
        }
    }

    pub fn pages(&self) -> &[PageDraw] {
        &self.pages
    }

    pub fn images(&self) -> &[PdfImage] {
        &self.images
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }
}
