//! PDF Font Handling
//!
//! Resumes are set in the Helvetica family of the standard 14 fonts, which
//! every viewer provides, so nothing is embedded. Widths come from the Adobe
//! font metrics and drive line wrapping; text is written in WinAnsiEncoding.

use super::objects::{PdfDictionary, PdfObject};
use std::collections::BTreeSet;

/// Helvetica family members used by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    pub fn from_style(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => StandardFont::Helvetica,
            (true, false) => StandardFont::HelveticaBold,
            (false, true) => StandardFont::HelveticaOblique,
            (true, true) => StandardFont::HelveticaBoldOblique,
        }
    }

    /// Get the PDF base font name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource name used in page dictionaries and `Tf` operators
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique)
    }

    /// Advance width of a WinAnsi byte in 1/1000 em.
    ///
    /// The oblique faces share the metrics of their upright counterparts.
    pub fn glyph_width(&self, byte: u8) -> u16 {
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match byte {
            32..=126 => table[(byte - 32) as usize],
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of a string in points at the given size
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .iter()
            .map(|&b| self.glyph_width(b) as u32)
            .sum();
        units as f64 * size / 1000.0
    }

    /// Font dictionary for a non-embedded standard font
    pub fn font_dict(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::typed("Font");
        dict.insert("Subtype", PdfObject::name("Type1"));
        dict.insert("BaseFont", PdfObject::name(self.pdf_name()));
        dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
        dict
    }
}

/// Fonts referenced by a document, in resource-name order
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    used: BTreeSet<StandardFont>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, font: StandardFont) {
        self.used.insert(font);
    }

    pub fn iter(&self) -> impl Iterator<Item = StandardFont> + '_ {
        self.used.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Width used for bytes outside the printable ASCII range
const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 112-126
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 112-126
];

/// Encode text as WinAnsiEncoding (CP1252) bytes.
///
/// Tabs become spaces, line breaks are dropped (callers split lines first)
/// and characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\n' | '\r' => return None,
        '\t' => b' ',
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        c if c.is_control() => return None,
        _ => b'?',
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names_are_stable() {
        assert_eq!(StandardFont::from_style(false, false).resource_name(), "F1");
        assert_eq!(StandardFont::from_style(true, false).resource_name(), "F2");
        assert_eq!(StandardFont::from_style(false, true).resource_name(), "F3");
        assert_eq!(StandardFont::from_style(true, true).resource_name(), "F4");
    }

    #[test]
    fn test_widths() {
        let regular = StandardFont::Helvetica;
        let bold = StandardFont::HelveticaBold;
        assert_eq!(regular.glyph_width(b' '), 278);
        assert_eq!(regular.glyph_width(b'W'), 944);
        assert_eq!(bold.glyph_width(b'i'), 278);
        assert!(bold.text_width("resume", 10.0) > regular.text_width("resume", 10.0));
        assert!((regular.text_width("AA", 10.0) - 13.34).abs() < 1e-9);
    }

    #[test]
    fn test_oblique_shares_metrics() {
        assert_eq!(
            StandardFont::HelveticaOblique.text_width("Dev", 12.0),
            StandardFont::Helvetica.text_width("Dev", 12.0)
        );
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Caf\u{e9}"), b"Caf\xE9".to_vec());
        assert_eq!(encode_win_ansi("\u{2013}\u{20AC}"), vec![0x96, 0x80]);
        assert_eq!(encode_win_ansi("a\tb\nc"), b"a bc".to_vec());
        assert_eq!(encode_win_ansi("\u{65E5}"), b"?".to_vec());
    }

    #[test]
    fn test_font_dict() {
        let dict = StandardFont::HelveticaBold.font_dict();
        assert_eq!(dict.get("BaseFont"), Some(&PdfObject::name("Helvetica-Bold")));
        assert_eq!(dict.get("Encoding"), Some(&PdfObject::name("WinAnsiEncoding")));
    }

    #[test]
    fn test_font_set_order() {
        let mut set = FontSet::new();
        set.insert(StandardFont::HelveticaOblique);
        set.insert(StandardFont::Helvetica);
        set.insert(StandardFont::Helvetica);
        let fonts: Vec<_> = set.iter().collect();
        assert_eq!(fonts, vec![StandardFont::Helvetica, StandardFont::HelveticaOblique]);
    }
}
