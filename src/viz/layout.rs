//! Pure chart geometry: everything the renderer draws, resolved to pixels.
//!
//! Computing the layout separately keeps rendering a straight walk over
//! precomputed shapes and makes the geometry testable without a backend.

use plotters::style::RGBColor;

use super::legend::{LegendEntry, layout_legend, legend_rows};
use super::types::{
    DEFAULT_PADDING, LEGEND_ROW_HEIGHT, MAX_LABELED_YEARS, Padding, Y_FALLBACK_MAX, Y_HEADROOM,
    Y_STEPS,
};
use super::util::{series_color, y_tick_label};
use crate::models::{CropList, DataRecord};
use crate::state::AppState;

/// Inputs for one chart: the table, one series per crop, and the captions.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec<'a> {
    pub data: &'a [DataRecord],
    pub crops: &'a CropList,
    pub title: String,
    pub y_axis: String,
}

impl<'a> ChartSpec<'a> {
    pub fn from_state(state: &'a AppState) -> Self {
        Self {
            data: &state.data,
            crops: &state.crops,
            title: state.title(),
            y_axis: format!("{} (in 1000 MT)", state.data_type),
        }
    }
}

/// Plot rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PlotRect {
    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub y: i32,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XTick {
    pub x: i32,
    pub year: i32,
    /// `None` when the label is thinned out; the gridline is still drawn.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPath {
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub y_axis: String,
    pub padding: Padding,
    pub plot: PlotRect,
    /// Top of the y domain (`max * 1.1`, or the fallback for all-zero data).
    pub y_max: f64,
    pub y_ticks: Vec<YTick>,
    pub x_ticks: Vec<XTick>,
    pub series: Vec<SeriesPath>,
    pub legend: Vec<LegendEntry>,
}

impl ChartLayout {
    /// Resolve the geometry for a `width` x `height` surface.
    /// Returns `None` for an empty table: there is nothing to draw.
    pub fn compute(spec: &ChartSpec<'_>, width: u32, height: u32) -> Option<Self> {
        if spec.data.is_empty() {
            return None;
        }

        let rows = legend_rows(spec.crops.len());
        let mut padding = DEFAULT_PADDING;
        padding.top += LEGEND_ROW_HEIGHT * rows.saturating_sub(1) as i32;

        let plot = PlotRect {
            left: padding.left,
            top: padding.top,
            right: width as i32 - padding.right,
            bottom: height as i32 - padding.bottom,
        };
        let chart_w = plot.width() as f64;
        let chart_h = plot.height() as f64;

        let max_value = spec
            .data
            .iter()
            .flat_map(|r| spec.crops.iter().map(move |c| r.get(c)))
            .max()
            .unwrap_or(0);
        let mut y_max = max_value as f64 * Y_HEADROOM;
        if y_max <= 0.0 {
            y_max = Y_FALLBACK_MAX;
        }

        let y_ticks = (0..=Y_STEPS)
            .map(|i| {
                let y = plot.top as f64 + chart_h * (Y_STEPS - i) as f64 / Y_STEPS as f64;
                let value = y_max * i as f64 / Y_STEPS as f64;
                YTick {
                    y: y.round() as i32,
                    value,
                    label: y_tick_label(value),
                }
            })
            .collect();

        let n = spec.data.len();
        let x_at = |i: usize| -> i32 {
            let x = if n == 1 {
                plot.left as f64 + chart_w / 2.0
            } else {
                plot.left as f64 + i as f64 * chart_w / (n - 1) as f64
            };
            x.round() as i32
        };
        let y_at = |v: i64| -> i32 {
            (plot.top as f64 + chart_h - (v as f64 / y_max) * chart_h).round() as i32
        };

        let thin_labels = n > MAX_LABELED_YEARS;
        let x_ticks = spec
            .data
            .iter()
            .enumerate()
            .map(|(i, r)| XTick {
                x: x_at(i),
                year: r.year,
                label: (!thin_labels || i % 2 == 0).then(|| r.year.to_string()),
            })
            .collect();

        let series: Vec<SeriesPath> = spec
            .crops
            .iter()
            .enumerate()
            .map(|(ci, crop)| SeriesPath {
                name: crop.to_string(),
                color: series_color(ci),
                points: spec
                    .data
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (x_at(i), y_at(r.get(crop))))
                    .collect(),
            })
            .collect();

        let legend_items: Vec<(String, RGBColor)> =
            series.iter().map(|s| (s.name.clone(), s.color)).collect();
        let legend = layout_legend(
            &legend_items,
            plot.left,
            DEFAULT_PADDING.top - 30,
            plot.width(),
        );

        Some(Self {
            width,
            height,
            title: spec.title.clone(),
            y_axis: spec.y_axis.clone(),
            padding,
            plot,
            y_max,
            y_ticks,
            x_ticks,
            series,
            legend,
        })
    }
}
