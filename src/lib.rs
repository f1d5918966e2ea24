//! cropstat_rs
//!
//! A small Rust library for entering, pasting, editing, exporting, and charting
//! crop statistics by year (production, import, or consumption of a country).
//! Pairs with the `cropstat` CLI and the `cropstat-gui` desktop app.
//!
//! ### Features
//! - Paste tab-separated spreadsheet ranges and merge them into the year table
//! - Add/remove crops and years, edit single cells
//! - Export as JSON (`{country, dataType, crops, data}`) or CSV (`Year,<crops>...`)
//! - Render an SVG/PNG line chart with one series per crop
//!
//! ### Example
//! ```no_run
//! use cropstat_rs::{AppState, storage, viz};
//!
//! let state = AppState::default();
//! let (state, report) = state.paste("2020\t100\t200\n2019\t50\t75")?;
//! println!("{} row(s) pasted", report.rows_applied);
//! storage::save_csv(&state, "production_china.csv")?;
//! viz::plot_chart(&viz::ChartSpec::from_state(&state), "chart.svg", 1000, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod format;
pub mod models;
pub mod paste;
pub mod state;
pub mod storage;
pub mod viz;

pub use models::{CropList, DataRecord, DataType};
pub use paste::{PasteError, PasteReport, parse_clipboard};
pub use state::{AppState, StateError};
