// File: crates/chart-core/src/text.rs
// Summary: Label eliding and approximate text metrics for layout decisions.

/// Characters kept before a label is cut and suffixed with `...`.
pub const LABEL_MAX_CHARS: usize = 18;

/// Average glyph advance as a fraction of the font size (sans-serif digits and lowercase).
const AVG_ADVANCE: f64 = 0.6;

/// Keep at most `max_chars` characters, appending `suffix` when something was cut.
pub fn elide(text: &str, max_chars: usize, suffix: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], suffix),
        None => text.to_string(),
    }
}

/// Rough rendered width; good enough to decide on rotation and spacing.
pub fn estimate_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVG_ADVANCE
}
