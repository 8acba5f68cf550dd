//! Text measurement and wrapping.
//!
//! Measurement is a fixed estimate: every character is `font_size × 0.6`
//! wide. Renderers never shape text, so the wrapped lines are identical in
//! the SVG document, the TikZ document and the interactive canvas.

/// Estimated width of one character, as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Baseline-to-baseline distance, as a fraction of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Horizontal space kept clear between a node's outline and its label.
pub const NODE_TEXT_PADDING: f64 = 8.0;

/// Width available to a node label inside a shape of the given width.
pub fn label_width(shape_width: f64) -> f64 {
    (shape_width - 2.0 * NODE_TEXT_PADDING).max(0.0)
}

/// Estimated rendered width of `text`.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH_FACTOR
}

/// Line height for `font_size`.
pub fn line_height(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Greedily wraps `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words are never split: a single word
/// wider than `max_width` occupies a line of its own. Runs of whitespace
/// collapse to one space. Empty input yields no lines.
///
/// ```
/// # use mudtote_core::text::wrap_text;
/// // 14px text: 8.4px per character, so 60px fits 7 characters.
/// assert_eq!(wrap_text("make a cup of tea", 60.0, 14.0), ["make a", "cup of", "tea"]);
/// assert_eq!(wrap_text("first\nsecond", 1000.0, 14.0), ["first", "second"]);
/// assert!(wrap_text("", 60.0, 14.0).is_empty());
/// ```
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate_chars = current.chars().count() + 1 + word.chars().count();
            if candidate_chars as f64 * font_size * CHAR_WIDTH_FACTOR <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
