//! Approximate text measurement from a proportional width table.
//!
//! Platforms with real font metrics override [`Canvas::measure_text`]; this is
//! the fallback every backend gets for free.
//!
//! [`Canvas::measure_text`]: super::Canvas::measure_text

use super::Font;
use crate::types::{Px, Size, SizePx};

/// Proportional character widths (hundredths of an average glyph) for the
/// printable ASCII range `' '..='~'`.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of an average glyph relative to the font size
pub const CHAR_WIDTH_RATIO: f64 = 0.57;

/// Bold glyphs are this much wider
pub const BOLD_WIDTH_FACTOR: f64 = 1.1;

/// Line advance relative to the font size
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Sum of proportional widths; anything outside printable ASCII counts as 100
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                u32::from(AW_CHAR[(c as usize) - 0x20])
            } else {
                100
            }
        })
        .sum()
}

/// Width in pixels of a single line
pub fn line_width(line: &str, font: &Font) -> f64 {
    let bold = if font.bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    f64::from(text_length(line)) * 0.01 * font.size * CHAR_WIDTH_RATIO * bold
}

pub fn line_height(font: &Font) -> f64 {
    font.size * LINE_HEIGHT_RATIO
}

/// Split on real newlines and on the two-character escape `\n`
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split("\\n").flat_map(|part| part.split('\n')).collect()
}

/// Greedy word wrap; a word longer than `max_width` keeps its own line.
pub fn wrap_line(line: &str, font: &Font, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && line_width(&candidate, font) > max_width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

/// Lines as they would be drawn, wrapped when a width limit is given
pub fn layout_lines(text: &str, font: &Font, max_width: Option<f64>) -> Vec<String> {
    split_lines(text)
        .into_iter()
        .flat_map(|line| match max_width {
            Some(w) if w > 0.0 => wrap_line(line, font, w),
            _ => vec![line.to_string()],
        })
        .collect()
}

/// Measured size, clamped to `max` when given
pub fn measure(text: &str, font: &Font, max: Option<SizePx>) -> SizePx {
    let lines = layout_lines(text, font, max.map(|m| m.width.0));
    let width = lines
        .iter()
        .map(|l| line_width(l, font))
        .fold(0.0, f64::max);
    let height = line_height(font) * lines.len() as f64;
    match max {
        Some(m) => Size::new(Px(width.min(m.width.0)), Px(height.min(m.height.0))),
        None => Size::new(Px(width), Px(height)),
    }
}
