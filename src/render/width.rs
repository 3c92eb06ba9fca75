//! Visible width helpers.
//!
//! Escape sequences occupy zero columns; everything else is measured per
//! grapheme so wide glyphs (CJK, box-drawing stays 1) count correctly.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Byte length of the escape sequence starting at `input[idx..]`, if any.
fn escape_len(input: &str, idx: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(idx) != Some(&0x1b) {
        return None;
    }
    match bytes.get(idx + 1) {
        // CSI: parameters and intermediates, then one final byte in 0x40-0x7e.
        Some(b'[') => {
            let mut end = idx + 2;
            while end < bytes.len() {
                let byte = bytes[end];
                if (0x40..=0x7e).contains(&byte) {
                    return Some(end - idx + 1);
                }
                end += 1;
            }
            Some(bytes.len() - idx)
        }
        // OSC: runs to BEL or ST.
        Some(b']') => {
            let mut end = idx + 2;
            while end < bytes.len() {
                if bytes[end] == 0x07 {
                    return Some(end - idx + 1);
                }
                if bytes[end] == 0x1b && bytes.get(end + 1) == Some(&b'\\') {
                    return Some(end - idx + 2);
                }
                end += 1;
            }
            Some(bytes.len() - idx)
        }
        Some(_) => Some(2),
        None => Some(1),
    }
}

pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

/// Columns the string occupies on screen, ignoring escape sequences.
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(len) = escape_len(input, idx) {
            idx += len;
            continue;
        }
        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        clean.push(ch);
        idx += ch.len_utf8();
    }

    clean.graphemes(true).map(grapheme_width).sum()
}

/// Truncates `line` to at most `width` visible columns, preserving escape
/// sequences (including any trailing reset) so styling never bleeds.
pub fn clamp_to_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut columns = 0;
    let mut truncated = false;
    let mut idx = 0;
    while idx < line.len() {
        if let Some(len) = escape_len(line, idx) {
            out.push_str(&line[idx..idx + len]);
            idx += len;
            continue;
        }
        let Some(ch) = line[idx..].chars().next() else {
            break;
        };
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if truncated || columns + ch_width > width {
            // Everything past the boundary is dropped; a wide glyph that
            // straddles it is dropped whole, not split.
            truncated = true;
            idx += ch.len_utf8();
            continue;
        }
        columns += ch_width;
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}
