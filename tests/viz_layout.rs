use cropstat_rs::viz::types::{DEFAULT_PADDING, LEGEND_ROW_HEIGHT};
use cropstat_rs::viz::util::series_color;
use cropstat_rs::viz::{ChartLayout, ChartSpec};
use cropstat_rs::{AppState, CropList, DataRecord, DataType};

fn years_state(years: std::ops::RangeInclusive<i32>) -> AppState {
    AppState {
        country: "China".into(),
        data_type: DataType::Production,
        crops: CropList::new(["Wheat", "Corn"]),
        data: years
            .map(|y| DataRecord::with_values(y, [("Wheat", (y - 2000) as i64), ("Corn", 1)]))
            .collect(),
    }
}

#[test]
fn empty_table_has_no_layout() {
    let state = AppState {
        data: Vec::new(),
        ..AppState::default()
    };
    assert!(ChartLayout::compute(&ChartSpec::from_state(&state), 800, 400).is_none());
}

#[test]
fn example_layout_uses_headroom_and_thins_year_labels() {
    let state = AppState::default().load_example();
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 1000, 600).unwrap();

    assert!((layout.y_max - 288842.0 * 1.1).abs() < 1e-6);
    assert_eq!(layout.title, "Production of Food in China (2010-2023)");
    assert_eq!(layout.y_axis, "Production (in 1000 MT)");

    assert_eq!(layout.x_ticks.len(), 14);
    let labeled: Vec<i32> = layout
        .x_ticks
        .iter()
        .filter(|t| t.label.is_some())
        .map(|t| t.year)
        .collect();
    assert_eq!(labeled, vec![2010, 2012, 2014, 2016, 2018, 2020, 2022]);

    assert_eq!(layout.series.len(), 7);
    assert!(layout.series.iter().all(|s| s.points.len() == 14));
}

#[test]
fn ten_years_keep_every_label() {
    let state = years_state(2011..=2020);
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 800, 400).unwrap();
    assert!(layout.x_ticks.iter().all(|t| t.label.is_some()));
}

#[test]
fn x_ticks_span_plot_evenly() {
    let state = years_state(2011..=2015);
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 800, 400).unwrap();
    let xs: Vec<i32> = layout.x_ticks.iter().map(|t| t.x).collect();
    assert_eq!(xs.first(), Some(&layout.plot.left));
    assert_eq!(xs.last(), Some(&layout.plot.right));
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn single_year_is_centered() {
    let state = years_state(2020..=2020);
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 1000, 600).unwrap();
    let plot = layout.plot;
    assert_eq!(layout.x_ticks[0].x, plot.left + plot.width() / 2);
    assert_eq!(layout.title, "Production of Food in China (2020)");
}

#[test]
fn all_zero_table_uses_fallback_domain() {
    let layout =
        ChartLayout::compute(&ChartSpec::from_state(&AppState::default()), 1000, 600).unwrap();
    assert_eq!(layout.y_max, 10.0);
    let values: Vec<f64> = layout.y_ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    // zero sits on the bottom edge
    assert_eq!(layout.y_ticks[0].y, layout.plot.bottom);
    assert_eq!(layout.y_ticks[5].y, layout.plot.top);
    assert!(
        layout
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .all(|&(_, y)| y == layout.plot.bottom)
    );
}

#[test]
fn seven_crops_wrap_legend_and_push_plot_down() {
    let state = AppState::default();
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 1000, 600).unwrap();

    assert_eq!(layout.padding.top, DEFAULT_PADDING.top + LEGEND_ROW_HEIGHT);
    assert_eq!(layout.plot.top, layout.padding.top);

    assert_eq!(layout.legend.len(), 7);
    let first = &layout.legend[0];
    let seventh = &layout.legend[6];
    assert_eq!(seventh.x, first.x);
    assert_eq!(seventh.y, first.y + LEGEND_ROW_HEIGHT);
    assert!(seventh.y + LEGEND_ROW_HEIGHT <= layout.plot.top);
}

#[test]
fn series_colors_follow_crop_order() {
    let state = years_state(2011..=2013);
    let layout = ChartLayout::compute(&ChartSpec::from_state(&state), 800, 400).unwrap();
    assert_eq!(layout.series[0].name, "Wheat");
    assert_eq!(layout.series[0].color, series_color(0));
    assert_eq!(layout.series[1].color, series_color(1));
    assert_eq!(layout.legend[1].color, series_color(1));
}

#[test]
fn layout_is_deterministic() {
    let state = AppState::default().load_example();
    let spec = ChartSpec::from_state(&state);
    assert_eq!(
        ChartLayout::compute(&spec, 900, 500),
        ChartLayout::compute(&spec, 900, 500)
    );
}
