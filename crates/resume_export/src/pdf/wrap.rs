//! Greedy line wrapping against standard font metrics
//!
//! Break opportunities follow UAX #14. A word wider than the line on its own
//! is split between grapheme clusters so that no emitted line overflows.

use super::fonts::StandardFont;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Explicit line breaks are kept; blank input yields no lines.
pub fn wrap_text(text: &str, font: StandardFont, size: f64, max_width: f64) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let fits = |s: &str| font.text_width(s.trim_end(), size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (offset, opportunity) in linebreaks(text) {
        let segment = &text[start..offset];
        start = offset;

        let mut candidate = current.clone();
        candidate.push_str(segment);
        if fits(&candidate) {
            current = candidate;
        } else {
            if !current.trim().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = split_oversized(segment, &fits, &mut lines);
        }

        if opportunity == BreakOpportunity::Mandatory && offset < text.len() {
            lines.push(current.trim_end().to_string());
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Emit full-width grapheme chunks of `segment`, returning the remainder
fn split_oversized(segment: &str, fits: &dyn Fn(&str) -> bool, lines: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    for grapheme in segment.graphemes(true) {
        let mut candidate = chunk.clone();
        candidate.push_str(grapheme);
        if fits(&candidate) || chunk.is_empty() {
            chunk = candidate;
        } else {
            lines.push(chunk.trim_end().to_string());
            chunk = grapheme.to_string();
        }
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FONT: StandardFont = StandardFont::Helvetica;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_text("Built things", FONT, 10.0, 500.0), vec!["Built things"]);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_text("   ", FONT, 10.0, 500.0).is_empty());
        assert!(wrap_text("", FONT, 10.0, 500.0).is_empty());
    }

    #[test]
    fn test_wraps_at_spaces() {
        let lines = wrap_text("alpha beta gamma delta", FONT, 10.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn test_explicit_newlines_kept() {
        let lines = wrap_text("first\nsecond\r\nthird", FONT, 10.0, 500.0);
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, FONT, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(FONT.text_width(line, 10.0) <= 100.0);
        }
    }

    proptest! {
        #[test]
        fn wrapped_lines_never_overflow(text in "[a-zA-Z ]{0,300}", width in 40.0f64..400.0) {
            for line in wrap_text(&text, FONT, 10.0, width) {
                prop_assert!(FONT.text_width(&line, 10.0) <= width);
            }
        }

        #[test]
        fn wrapping_keeps_every_word(text in "[a-z]{1,8}( [a-z]{1,8}){0,40}") {
            let lines = wrap_text(&text, FONT, 10.0, 120.0);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(rejoined, original);
        }
    }
}
