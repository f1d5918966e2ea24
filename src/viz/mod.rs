//! Visualization: render the crop table as a multi-series line chart to **SVG**, **PNG**,
//! or a raw RGB buffer.
//!
//! - One polyline per crop with "donut" point markers, colors reused cyclically
//! - Y domain `[0, max * 1.1]` with 5 labeled gridline steps
//! - One x tick per year; labels thinned to every second year above 10 years
//! - Legend rows (6 entries each) between the title and the plot
//!
//! Every call is a full redraw. An empty table creates no surface at all
//! ([`RenderOutcome::Empty`] / `Ok(None)`), leaving the placeholder to the caller.

pub mod layout;
pub mod legend;
pub mod text;
pub mod types;
pub mod util;
pub mod view;

pub use layout::{ChartLayout, ChartSpec};
pub use types::{DEFAULT_PADDING, Padding, RenderOutcome, RgbFrame};
pub use view::ChartView;

use anyhow::{Result, anyhow, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::draw_legend;
use types::{LINE_WIDTH, POINT_INNER_RADIUS, POINT_RADIUS, TITLE_CENTER_Y};
use util::{AXIS_COLOR, GRID_COLOR, LABEL_COLOR, TITLE_COLOR};

/// One-time registration of the embedded "sans-serif" fonts for the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/`
        if plotters::style::register_font(
            "sans-serif",
            FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("could not register regular chart font");
        }
        if plotters::style::register_font(
            "sans-serif",
            FontStyle::Bold,
            include_bytes!("../../assets/DejaVuSans-Bold.ttf"),
        )
        .is_err()
        {
            log::warn!("could not register bold chart font");
        }
    });
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("drawing surface has zero size ({width}x{height})");
    }
    Ok(())
}

/// Render to an SVG document. `Ok(None)` for an empty table.
pub fn render_svg(spec: &ChartSpec<'_>, width: u32, height: u32) -> Result<Option<String>> {
    let Some(layout) = ChartLayout::compute(spec, width, height) else {
        return Ok(None);
    };
    check_size(width, height)?;
    ensure_fonts_registered();

    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_chart(&root, &layout)?;
    }
    Ok(Some(buf))
}

/// Render into a packed RGB pixel buffer (e.g. for a GUI texture). `Ok(None)` for an empty table.
pub fn render_rgb(spec: &ChartSpec<'_>, width: u32, height: u32) -> Result<Option<RgbFrame>> {
    let Some(layout) = ChartLayout::compute(spec, width, height) else {
        return Ok(None);
    };
    check_size(width, height)?;
    ensure_fonts_registered();

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(&root, &layout)?;
    }
    Ok(Some(RgbFrame {
        width,
        height,
        pixels,
    }))
}

/// Render to a file; `.svg` selects the SVG backend, anything else is written as a bitmap.
/// No file is created for an empty table.
pub fn plot_chart<P: AsRef<Path>>(
    spec: &ChartSpec<'_>,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<RenderOutcome> {
    let Some(layout) = ChartLayout::compute(spec, width, height) else {
        log::info!("chart skipped: no data");
        return Ok(RenderOutcome::Empty);
    };
    check_size(width, height)?;
    ensure_fonts_registered();

    let out_path = out_path.as_ref();
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        draw_chart(&root, &layout)?;
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        draw_chart(&root, &layout)?;
    }
    log::info!("wrote chart to {}", out_path.display());
    Ok(RenderOutcome::Rendered)
}

fn draw_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn text_style(px: u32, style: FontStyle, color: &'static RGBColor, pos: Pos) -> TextStyle<'static> {
    TextStyle::from(FontDesc::new(FontFamily::SansSerif, px as f64, style))
        .color(color)
        .pos(pos)
}

/// Draw a resolved layout onto any Plotters backend.
pub fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, layout: &ChartLayout) -> Result<()>
where
    DB: DrawingBackend,
{
    let plot = layout.plot;

    root.fill(&WHITE).map_err(draw_err)?;

    // Title
    let title_style = text_style(
        20,
        FontStyle::Bold,
        &TITLE_COLOR,
        Pos::new(HPos::Center, VPos::Center),
    );
    root.draw(&Text::new(
        layout.title.as_str(),
        (layout.width as i32 / 2, TITLE_CENTER_Y),
        title_style,
    ))
    .map_err(draw_err)?;

    // Horizontal gridlines + y labels
    let y_label_style = text_style(
        12,
        FontStyle::Normal,
        &LABEL_COLOR,
        Pos::new(HPos::Right, VPos::Center),
    );
    for tick in &layout.y_ticks {
        root.draw(&PathElement::new(
            vec![(plot.left, tick.y), (plot.right, tick.y)],
            GRID_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            tick.label.as_str(),
            (plot.left - 10, tick.y),
            y_label_style.clone(),
        ))
        .map_err(draw_err)?;
    }

    // Vertical gridlines + x labels
    let x_label_style = text_style(
        12,
        FontStyle::Normal,
        &LABEL_COLOR,
        Pos::new(HPos::Center, VPos::Top),
    );
    for tick in &layout.x_ticks {
        root.draw(&PathElement::new(
            vec![(tick.x, plot.top), (tick.x, plot.bottom)],
            GRID_COLOR.stroke_width(1),
        ))
        .map_err(draw_err)?;
        if let Some(label) = &tick.label {
            root.draw(&Text::new(
                label.as_str(),
                (tick.x, plot.bottom + 10),
                x_label_style.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    // Axes
    root.draw(&PathElement::new(
        vec![(plot.left, plot.top), (plot.left, plot.bottom)],
        AXIS_COLOR.stroke_width(1),
    ))
    .map_err(draw_err)?;
    root.draw(&PathElement::new(
        vec![(plot.left, plot.bottom), (plot.right, plot.bottom)],
        AXIS_COLOR.stroke_width(1),
    ))
    .map_err(draw_err)?;

    // Rotated y-axis description
    let y_desc_style = text_style(
        14,
        FontStyle::Normal,
        &LABEL_COLOR,
        Pos::new(HPos::Center, VPos::Center),
    )
    .transform(FontTransform::Rotate270);
    root.draw(&Text::new(
        layout.y_axis.as_str(),
        (20, layout.height as i32 / 2),
        y_desc_style,
    ))
    .map_err(draw_err)?;

    // Series: polyline first, then donut markers on top
    for s in &layout.series {
        root.draw(&PathElement::new(
            s.points.clone(),
            s.color.stroke_width(LINE_WIDTH),
        ))
        .map_err(draw_err)?;
        for &p in &s.points {
            root.draw(&Circle::new(p, POINT_RADIUS, s.color.filled()))
                .map_err(draw_err)?;
            root.draw(&Circle::new(p, POINT_INNER_RADIUS, WHITE.filled()))
                .map_err(draw_err)?;
        }
    }

    draw_legend(root, &layout.legend)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
