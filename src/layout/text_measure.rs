//! Text Measurement
//!
//! Measures text in terminal cells and wraps it the way a browser wraps a
//! paragraph: at word boundaries (UAX #29), falling back to grapheme breaks
//! only for words wider than the line. The balancer depends on this: with
//! word breaking, narrowing a box can change how many lines it takes
//! without changing how wide the text is, which is what makes the last line
//! of a paragraph worth balancing.
//!
//! Widths come from `unicode-width` per grapheme cluster:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji and emoji sequences: 2 cells
//! - Control and combining characters: 0 cells

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

// =============================================================================
// Width
// =============================================================================

/// Display width of a single Unicode codepoint in terminal cells.
#[inline]
pub fn char_width(c: char) -> usize {
    match c as u32 {
        0x2600..=0x27BF | 0x1F300..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F900..=0x1F9FF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a grapheme cluster in terminal cells.
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else { return 0 };

    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Flags (regional indicator pairs)
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }

    // ZWJ sequences, VS16, skin tones, keycaps
    if chars.any(|c| matches!(c as u32, 0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF | 0x20E3)) {
        return 2;
    }

    char_width(first)
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

// =============================================================================
// Wrapping
// =============================================================================

/// Wrap text by breaking at word boundaries.
///
/// Explicit newlines are hard breaks. Trailing whitespace of a wrapped line
/// is dropped and a wrapped line never starts with whitespace.
///
/// Returns an empty `Vec` for empty input. A `max_width` of zero disables
/// wrapping.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }
    if max_width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        wrap_line(raw_line, max_width, &mut lines);
    }
    lines
}

fn wrap_line(line: &str, max_width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0usize;

    for segment in line.split_word_bounds() {
        let seg_width = string_width(segment);

        if current_width + seg_width > max_width {
            if is_whitespace(segment) {
                // Break here; the space is swallowed by the line break.
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current).trim_end().to_string());
                    current_width = 0;
                }
                continue;
            }

            if current_width > 0 {
                lines.push(std::mem::take(&mut current).trim_end().to_string());
                current_width = 0;
            }

            if seg_width > max_width {
                force_break(segment, max_width, lines, &mut current, &mut current_width);
                continue;
            }
        } else if current_width == 0 && is_whitespace(segment) && !lines.is_empty() {
            continue;
        }

        current.push_str(segment);
        current_width += seg_width;
    }

    lines.push(current.trim_end().to_string());
}

/// Break a segment wider than the line at grapheme boundaries.
fn force_break(
    segment: &str,
    max_width: usize,
    lines: &mut Vec<String>,
    current: &mut String,
    current_width: &mut usize,
) {
    for grapheme in segment.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if *current_width + gw > max_width && !current.is_empty() {
            lines.push(std::mem::take(current));
            *current_width = 0;
        }
        current.push_str(grapheme);
        *current_width += gw;
    }
}

/// Measure the height of text when word-wrapped to a given width.
///
/// Returns the number of lines (0 for empty text).
pub fn measure_text_height(text: &str, max_width: usize) -> usize {
    wrap_text(text, max_width).len()
}

// =============================================================================
// Intrinsic Sizes
// =============================================================================

/// Width of the widest explicit line (max-content width).
pub fn max_content_width(text: &str) -> usize {
    text.split('\n').map(|line| string_width(line.trim_end())).max().unwrap_or(0)
}

/// Width of the widest word (min-content width).
pub fn min_content_width(text: &str) -> usize {
    text.split_word_bounds()
        .filter(|segment| !is_whitespace(segment))
        .map(string_width)
        .max()
        .unwrap_or(0)
}
