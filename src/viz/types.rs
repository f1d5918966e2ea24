//! Public types and constants for the visualization module.

/// Insets around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Room for title + one legend row (top), y labels (left), x labels (bottom).
pub const DEFAULT_PADDING: Padding = Padding {
    top: 60,
    right: 30,
    bottom: 60,
    left: 80,
};

/// Vertical center of the title, above the first legend row.
pub const TITLE_CENTER_Y: i32 = 15;

/// Number of gridline steps on the y axis (6 lines including zero).
pub const Y_STEPS: usize = 5;

/// Headroom multiplier applied to the largest value.
pub const Y_HEADROOM: f64 = 1.1;

/// Y domain used when every value is zero (or negative).
pub const Y_FALLBACK_MAX: f64 = 10.0;

/// Above this many years only every second year gets a label.
pub const MAX_LABELED_YEARS: usize = 10;

pub const LEGEND_PER_ROW: usize = 6;
pub const LEGEND_ROW_HEIGHT: i32 = 20;
pub const LEGEND_SWATCH: i32 = 12;

pub const POINT_RADIUS: i32 = 4;
pub const POINT_INNER_RADIUS: i32 = 2;
pub const LINE_WIDTH: u32 = 2;

/// Result of a render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A surface was created and drawn.
    Rendered,
    /// Nothing to draw; no surface was created. Show a placeholder instead.
    Empty,
}

/// Packed 8-bit RGB pixels, row-major, `width * height * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
