//! Utility functions for visualization: colors and tick label formatting.

use crate::format::{format_number, round_half_up};
use plotters::prelude::*;

/// Series palette, reused cyclically by crop position.
/// Order: Blue, Orange, Green, Purple, Red, Indigo, Yellow, Light Blue, Bright Red, Lime, Gray, Black.
const SERIES12: [RGBColor; 12] = [
    RGBColor(0, 122, 255),    // blue
    RGBColor(255, 149, 0),    // orange
    RGBColor(52, 199, 89),    // green
    RGBColor(175, 82, 222),   // purple
    RGBColor(255, 45, 85),    // red
    RGBColor(88, 86, 214),    // indigo
    RGBColor(255, 204, 0),    // yellow
    RGBColor(90, 200, 250),   // light blue
    RGBColor(255, 59, 48),    // bright red
    RGBColor(76, 217, 100),   // lime green
    RGBColor(142, 142, 147),  // gray
    RGBColor(0, 0, 0),        // black
];

pub const TITLE_COLOR: RGBColor = RGBColor(0x33, 0x33, 0x33);
pub const LABEL_COLOR: RGBColor = RGBColor(0x66, 0x66, 0x66);
pub const AXIS_COLOR: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);
pub const GRID_COLOR: RGBColor = RGBColor(0xf0, 0xf0, 0xf0);

/// Get a color from the series palette.
#[inline]
pub fn series_color(idx: usize) -> RGBColor {
    SERIES12[idx % SERIES12.len()]
}

/// Y tick label: rounded, with thousands separators.
pub fn y_tick_label(v: f64) -> String {
    format_number(round_half_up(v))
}
