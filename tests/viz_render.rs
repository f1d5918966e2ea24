use cropstat_rs::AppState;
use cropstat_rs::viz::{self, ChartSpec, ChartView, RenderOutcome};
use std::fs;
use tempfile::TempDir;

fn empty_state() -> AppState {
    AppState {
        data: Vec::new(),
        ..AppState::default()
    }
}

#[test]
fn renders_svg_file() {
    let state = AppState::default().load_example();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("chart.svg");

    let outcome = viz::plot_chart(&ChartSpec::from_state(&state), &out, 1000, 600).unwrap();
    assert_eq!(outcome, RenderOutcome::Rendered);

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Production of Food in China (2010-2023)"));
    assert!(svg.contains("Soybean Meal"));
}

#[test]
fn renders_png_file() {
    let state = AppState::default().load_example();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("chart.png");

    viz::plot_chart(&ChartSpec::from_state(&state), &out, 640, 400).unwrap();
    let meta = fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
}

#[test]
fn empty_table_creates_no_file() {
    let state = empty_state();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("empty.svg");

    let outcome = viz::plot_chart(&ChartSpec::from_state(&state), &out, 800, 400).unwrap();
    assert_eq!(outcome, RenderOutcome::Empty);
    assert!(!out.exists());

    assert!(viz::render_svg(&ChartSpec::from_state(&state), 800, 400).unwrap().is_none());
    assert!(viz::render_rgb(&ChartSpec::from_state(&state), 800, 400).unwrap().is_none());
}

#[test]
fn zero_sized_surface_is_an_error() {
    let state = AppState::default();
    assert!(viz::render_svg(&ChartSpec::from_state(&state), 0, 400).is_err());
}

#[test]
fn svg_output_is_repeatable() {
    let state = AppState::default().load_example();
    let spec = ChartSpec::from_state(&state);
    let a = viz::render_svg(&spec, 900, 500).unwrap().unwrap();
    let b = viz::render_svg(&spec, 900, 500).unwrap().unwrap();
    assert_eq!(a, b);
}

#[test]
fn rgb_frame_matches_requested_size() {
    let state = AppState::default().load_example();
    let frame = viz::render_rgb(&ChartSpec::from_state(&state), 320, 200)
        .unwrap()
        .unwrap();
    assert_eq!((frame.width, frame.height), (320, 200));
    assert_eq!(frame.pixels.len(), 320 * 200 * 3);
    // background is filled white
    assert_eq!(&frame.pixels[..3], &[255, 255, 255]);
}

#[test]
fn chart_view_redraws_only_on_change() {
    let mut view = ChartView::new();
    let state = AppState::default().load_example();

    assert!(view.refresh(&state, 400, 300).unwrap().is_some());
    assert_eq!(view.generation(), 1);

    view.refresh(&state, 400, 300).unwrap();
    assert_eq!(view.generation(), 1);

    view.refresh(&state, 500, 300).unwrap();
    assert_eq!(view.generation(), 2);

    let edited = state.set_value(2015, "Wheat", "1");
    view.refresh(&edited, 500, 300).unwrap();
    assert_eq!(view.generation(), 3);

    let renamed = edited.with_country("Brazil");
    view.refresh(&renamed, 500, 300).unwrap();
    assert_eq!(view.generation(), 4);

    view.invalidate();
    view.refresh(&renamed, 500, 300).unwrap();
    assert_eq!(view.generation(), 5);
}

#[test]
fn chart_view_clears_on_empty_table() {
    let mut view = ChartView::new();
    view.refresh(&AppState::default(), 400, 300).unwrap();
    assert!(view.frame().is_some());

    assert!(view.refresh(&empty_state(), 400, 300).unwrap().is_none());
    assert!(view.frame().is_none());
}
