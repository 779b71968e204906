//! PDF Content Stream Generation
//!
//! Builder for the page content streams. Only the operators the resume
//! layout draws with are provided:
//!
//! - q/Q: Save/restore graphics state
//! - cm: Concatenate transformation matrix
//! - BT/ET: Begin/End text object
//! - Tf: Set font and size
//! - Td: Move text position
//! - Tj: Show text string
//! - Do: Paint an XObject

use super::objects::{format_number, write_literal};

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Graphics State Operators
    // =========================================================================

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q")
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q")
    }

    /// Concatenate a transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let line = format!(
            "{} {} {} {} {} {} cm",
            format_number(a),
            format_number(b),
            format_number(c),
            format_number(d),
            format_number(e),
            format_number(f)
        );
        self.write_line(&line)
    }

    // =========================================================================
    // Text Operators
    // =========================================================================

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT")
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET")
    }

    /// Set the font resource and size (Tf)
    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        let line = format!("/{} {} Tf", resource, format_number(size));
        self.write_line(&line)
    }

    /// Move to the start of the next line (Td)
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        let line = format!("{} {} Td", format_number(tx), format_number(ty));
        self.write_line(&line)
    }

    /// Show a string already encoded for the current font (Tj)
    pub fn show_text(&mut self, encoded: &[u8]) -> &mut Self {
        write_literal(&mut self.data, encoded);
        self.write_line(" Tj")
    }

    // =========================================================================
    // XObject Operators
    // =========================================================================

    /// Paint a named XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let line = format!("/{} Do", name);
        self.write_line(&line)
    }

    /// Paint an image XObject scaled into the given rectangle.
    ///
    /// `(x, y)` is the lower-left corner in PDF user space.
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.save_state()
            .transform(width, 0.0, 0.0, height, x, y)
            .draw_xobject(name)
            .restore_state()
    }

    fn write_line(&mut self, line: &str) -> &mut Self {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
        self
    }
}
