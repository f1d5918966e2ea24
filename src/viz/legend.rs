//! Legend layout and drawing: swatch + name entries flowing in rows above the plot.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::fit_label;
use super::types::{LEGEND_PER_ROW, LEGEND_ROW_HEIGHT, LEGEND_SWATCH};
use super::util::TITLE_COLOR;

const LEGEND_FONT_PX: u32 = 12;
const SWATCH_TO_TEXT_GAP: i32 = 4;

/// One legend item with its resolved top-left position.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    pub x: i32,
    pub y: i32,
}

/// Rows needed for `n` entries (0 for no series).
pub fn legend_rows(n: usize) -> usize {
    n.div_ceil(LEGEND_PER_ROW)
}

/// Place entries left to right from `start_x`, wrapping every `LEGEND_PER_ROW`.
///
/// Slot width is the plot width divided by the number of columns actually
/// used, so a short legend spreads across the plot instead of bunching left.
/// Labels wider than their slot are truncated with an ellipsis.
pub fn layout_legend(
    items: &[(String, RGBColor)],
    start_x: i32,
    first_row_y: i32,
    plot_width: i32,
) -> Vec<LegendEntry> {
    if items.is_empty() {
        return Vec::new();
    }
    let cols = items.len().min(LEGEND_PER_ROW) as f64;
    let slot_w = plot_width.max(0) as f64 / cols;
    let text_cap = (slot_w as i32 - LEGEND_SWATCH - SWATCH_TO_TEXT_GAP * 2).max(12) as u32;

    items
        .iter()
        .enumerate()
        .map(|(i, (label, color))| {
            let col = (i % LEGEND_PER_ROW) as f64;
            let row = (i / LEGEND_PER_ROW) as i32;
            LegendEntry {
                label: fit_label(label, LEGEND_FONT_PX, text_cap),
                color: *color,
                x: start_x + (col * slot_w).round() as i32,
                y: first_row_y + row * LEGEND_ROW_HEIGHT,
            }
        })
        .collect()
}

/// Draw swatches and labels at their precomputed positions.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
) -> Result<()> {
    let label_style = TextStyle::from(FontDesc::new(
        FontFamily::SansSerif,
        LEGEND_FONT_PX as f64,
        FontStyle::Normal,
    ))
    .color(&TITLE_COLOR)
    .pos(Pos::new(HPos::Left, VPos::Center));

    for e in entries {
        area.draw(&Rectangle::new(
            [(e.x, e.y), (e.x + LEGEND_SWATCH, e.y + LEGEND_SWATCH)],
            e.color.filled(),
        ))
        .map_err(|err| anyhow::anyhow!("{:?}", err))?;

        area.draw(&Text::new(
            e.label.as_str(),
            (e.x + LEGEND_SWATCH + SWATCH_TO_TEXT_GAP, e.y + LEGEND_SWATCH / 2),
            label_style.clone(),
        ))
        .map_err(|err| anyhow::anyhow!("{:?}", err))?;
    }
    Ok(())
}
