//! Legend label fitting.

/// Average glyph advance of DejaVu Sans as a fraction of the font size.
const AVG_ADVANCE: f32 = 0.6;

/// Approximate rendered width of `text` at `font_px`.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    (text.chars().count() as f32 * font_px as f32 * AVG_ADVANCE).ceil() as u32
}

/// Whole characters that fit in `max_px` (never less than one).
fn char_budget(font_px: u32, max_px: u32) -> usize {
    let advance = font_px.max(1) as f32 * AVG_ADVANCE;
    ((max_px as f32 / advance).floor() as usize).max(1)
}

/// Shorten a legend label to its slot. The cut is marked with `…` and
/// whitespace left dangling before it is dropped (`"Soybean Meal"` -> `"Soybean…"`).
pub fn fit_label(label: &str, font_px: u32, max_px: u32) -> String {
    let budget = char_budget(font_px, max_px);
    if label.chars().count() <= budget {
        return label.to_string();
    }
    let kept: String = label.chars().take(budget - 1).collect();
    format!("{}…", kept.trim_end())
}
