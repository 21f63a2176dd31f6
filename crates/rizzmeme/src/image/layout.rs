//! Score substitution and word wrapping.
//!
//! Widths here are estimates from a fixed per-character factor, not glyph
//! metrics, so wrapping is identical whichever font ends up painting.

use crate::error::TemplateFormatError;
use crate::templates::WrapMode;

/// Estimated advance of one character, as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Estimated width of the gap between two words, as a fraction of the font size.
pub const SPACE_WIDTH_FACTOR: f64 = 0.3;
/// Extra pixels between the font size and the line pitch of wrapped text.
pub const LINE_GAP: i32 = 10;

const SCORE_FIELD: &str = "score";

/// Substitute `score` into a brace-format template.
///
/// `{score}` is replaced by the plain integer, `{{` and `}}` are literal
/// braces. Text without any field is returned unchanged.
pub fn format_score(template: &str, score: i32) -> Result<String, TemplateFormatError> {
    let mut out = String::with_capacity(template.len() + 4);
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => {
                            return Err(TemplateFormatError::UnmatchedOpen(pos));
                        }
                        Some((_, c)) => field.push(c),
                    }
                }
                if field != SCORE_FIELD {
                    return Err(TemplateFormatError::UnknownField(field));
                }
                out.push_str(&score.to_string());
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(TemplateFormatError::UnmatchedClose(pos));
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

pub fn word_width(word: &str, font_size: u32) -> f64 {
    word.chars().count() as f64 * (font_size as f64 * CHAR_WIDTH_FACTOR)
}

fn space_width(font_size: u32) -> f64 {
    font_size as f64 * SPACE_WIDTH_FACTOR
}

/// Estimated width of a line of space-separated words.
pub fn estimate_width(line: &str, font_size: u32) -> f64 {
    let mut words = 0usize;
    let mut width = 0.0;
    for word in line.split_whitespace() {
        width += word_width(word, font_size);
        words += 1;
    }
    width + words.saturating_sub(1) as f64 * space_width(font_size)
}

/// Greedy word wrap against the estimated width.
///
/// A word wider than `max_width` on its own is never split; it gets a line
/// to itself.
pub fn wrap(text: &str, font_size: u32, max_width: u32) -> Vec<String> {
    let max_width = max_width as f64;
    let spacing = space_width(font_size);

    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    // Width of `current` including the gap that would precede the next word.
    let mut running = 0.0;

    for word in text.split_whitespace() {
        let width = word_width(word, font_size);
        if !current.is_empty() && running + width > max_width {
            lines.push(current.join(" "));
            current.clear();
            running = 0.0;
        }
        current.push(word);
        running += width + spacing;
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Split overlay text into the lines that get painted.
pub fn layout_lines(text: &str, font_size: u32, mode: WrapMode) -> Vec<String> {
    match mode {
        WrapMode::NoWrap => vec![text.to_string()],
        WrapMode::WrapAt(max_width) => wrap(text, font_size, max_width),
    }
}

/// Top of line `index` out of `line_count`, for text anchored at `y`.
pub fn line_top(y: i32, index: usize, line_count: usize, font_size: u32) -> i32 {
    if line_count > 1 {
        y + index as i32 * (font_size as i32 + LINE_GAP)
    } else {
        y
    }
}
