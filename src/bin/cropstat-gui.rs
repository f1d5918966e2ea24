/*!
 * GUI application for cropstat-rs - crop statistics entry and charting
 *
 * A cross-platform desktop application providing an interface for:
 * - Choosing the country and data type
 * - Managing crops, pasting spreadsheet ranges, editing the year table
 * - Viewing the line chart and exporting JSON/CSV
 *
 * Platform support: Windows, macOS, Linux
 */

use cropstat_rs::format::format_number;
use cropstat_rs::viz::ChartView;
use cropstat_rs::{AppState, DataType, StateError, storage};
use eframe::egui;
use std::path::PathBuf;

const CHART_HEIGHT: f32 = 420.0;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Crop Statistics - cropstat"),
        ..Default::default()
    };

    eframe::run_native(
        "Crop Statistics",
        options,
        Box::new(|_cc| Ok(Box::new(CropstatApp::new()))),
    )
}

/// Main application state
struct CropstatApp {
    // Session data, replaced wholesale by every edit
    state: AppState,

    // Input fields
    new_crop: String,
    new_year: i32,
    paste_buffer: String,
    export_dir: PathBuf,

    // UI state
    status_message: String,
    error_message: String,

    // Chart
    chart: ChartView,
    chart_texture: Option<(u64, egui::TextureHandle)>,
}

/// Table edits collected while drawing the grid, applied after the loop.
enum GridEdit {
    Value { year: i32, crop: String, text: String },
    RemoveYear(i32),
}

impl CropstatApp {
    fn new() -> Self {
        let state = AppState::default();
        let new_year = state.next_year_suggestion();
        Self {
            state,
            new_crop: String::new(),
            new_year,
            paste_buffer: String::new(),
            export_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            status_message: String::new(),
            error_message: String::new(),
            chart: ChartView::new(),
            chart_texture: None,
        }
    }

    fn notify_ok(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.error_message.clear();
    }

    fn notify_err(&mut self, msg: impl Into<String>) {
        self.error_message = msg.into();
        self.status_message.clear();
    }

    /// Install a new snapshot or surface the rejection.
    fn apply(&mut self, result: Result<AppState, StateError>, ok_msg: String) {
        match result {
            Ok(next) => {
                self.state = next;
                self.notify_ok(ok_msg);
            }
            Err(err) => self.notify_err(err.to_string()),
        }
    }

    fn paste_text(&mut self, text: &str) {
        match self.state.paste(text) {
            Ok((next, report)) => {
                self.state = next;
                self.new_year = self.state.next_year_suggestion();
                self.notify_ok(format!(
                    "Data successfully pasted ({} row(s))",
                    report.rows_applied
                ));
            }
            Err(StateError::Paste(cropstat_rs::PasteError::NoData)) => {
                self.notify_err("No data found in clipboard")
            }
            Err(err) => {
                log::error!("error parsing clipboard data: {err}");
                self.notify_err("Failed to parse clipboard data");
            }
        }
    }

    fn paste_from_clipboard(&mut self) {
        let text = arboard::Clipboard::new().and_then(|mut c| c.get_text());
        match text {
            Ok(text) => self.paste_text(&text),
            Err(err) => {
                log::error!("clipboard read failed: {err}");
                self.notify_err("Failed to parse clipboard data");
            }
        }
    }

    fn save_json(&mut self) {
        let name = storage::json_file_name(self.state.data_type, &self.state.country);
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name(name.as_str())
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        match storage::save_json(&self.state, &path) {
            Ok(()) => {
                self.remember_dir(&path);
                self.notify_ok("Data saved successfully");
            }
            Err(err) => self.notify_err(format!("Failed to save JSON: {err}")),
        }
    }

    fn export_csv(&mut self) {
        let name = storage::csv_file_name_today(self.state.data_type, &self.state.country);
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name(name.as_str())
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        match storage::save_csv(&self.state, &path) {
            Ok(()) => {
                self.remember_dir(&path);
                self.notify_ok(format!("Exported {} rows to CSV", self.state.data.len()));
            }
            Err(err) => self.notify_err(format!("Failed to save CSV: {err}")),
        }
    }

    fn remember_dir(&mut self, path: &std::path::Path) {
        if let Some(dir) = path.parent() {
            self.export_dir = dir.to_path_buf();
        }
    }

    fn input_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Country:");
                let mut country = self.state.country.clone();
                if ui
                    .text_edit_singleline(&mut country)
                    .on_hover_text("Enter country name")
                    .changed()
                {
                    self.state = self.state.with_country(&country);
                }

                ui.label("Data type:");
                let mut data_type = self.state.data_type;
                egui::ComboBox::from_id_salt("data_type")
                    .selected_text(data_type.label())
                    .show_ui(ui, |ui| {
                        for dt in DataType::ALL {
                            ui.selectable_value(&mut data_type, dt, dt.label());
                        }
                    });
                if data_type != self.state.data_type {
                    self.state = self.state.with_data_type(data_type);
                }
            });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    self.state = self.state.reset_data();
                    self.new_year = self.state.next_year_suggestion();
                    self.notify_ok("Data reset to default");
                }
                if ui.button("Load Example").clicked() {
                    self.load_example();
                }
                if ui.button("Save").clicked() {
                    self.save_json();
                }
                if ui.button("Export CSV").clicked() {
                    self.export_csv();
                }
            });
        });

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.label("Manage Crops");
            let mut remove: Option<String> = None;
            ui.horizontal_wrapped(|ui| {
                for crop in self.state.crops.iter() {
                    ui.group(|ui| {
                        ui.label(crop);
                        if ui
                            .small_button("✕")
                            .on_hover_text(format!("Remove {crop}"))
                            .clicked()
                        {
                            remove = Some(crop.to_string());
                        }
                    });
                }
            });
            if let Some(crop) = remove {
                let result = self.state.remove_crop(&crop);
                self.apply(result, format!("Removed {crop} from crops"));
            }

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_crop).hint_text("Add new crop"),
                );
                if ui.button("Add").clicked() {
                    let name = self.new_crop.trim().to_string();
                    let result = self.state.add_crop(&self.new_crop);
                    let added = result.is_ok();
                    self.apply(result, format!("Added {name} to crops"));
                    if added {
                        self.new_crop.clear();
                    }
                }
            });
        });

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Clipboard");
                ui.weak("Copy data from Excel and paste");
            });
            if ui
                .add_sized(
                    [ui.available_width(), 40.0],
                    egui::Button::new("Click to paste data from clipboard"),
                )
                .clicked()
            {
                self.paste_from_clipboard();
            }
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.paste_buffer)
                        .desired_rows(2)
                        .hint_text("…or paste tab-separated rows here"),
                );
                if ui.button("Apply").clicked() {
                    let text = std::mem::take(&mut self.paste_buffer);
                    self.paste_text(&text);
                }
            });
        });
    }

    fn load_example(&mut self) {
        self.state = self.state.load_example();
        self.new_year = self.state.next_year_suggestion();
        self.notify_ok("Example data loaded");
    }

    fn table_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Data Table");
                ui.add_space(20.0);
                ui.add(egui::DragValue::new(&mut self.new_year).range(1900..=2100));
                if ui.button("Add Year").clicked() {
                    let year = self.new_year;
                    let result = self.state.add_year(year);
                    if result.is_ok() {
                        self.new_year = year + 1;
                    }
                    self.apply(result, format!("Added year {year}"));
                }
            });

            let mut edits: Vec<GridEdit> = Vec::new();
            egui::ScrollArea::horizontal().show(ui, |ui| {
                egui::Grid::new("data_grid").striped(true).show(ui, |ui| {
                    ui.strong("Year");
                    for crop in self.state.crops.iter() {
                        ui.strong(crop);
                    }
                    ui.strong("Action");
                    ui.end_row();

                    if self.state.data.is_empty() {
                        ui.label("No data available. Add a year or load example data.");
                        ui.end_row();
                    }

                    for rec in &self.state.data {
                        ui.label(rec.year.to_string());
                        for crop in self.state.crops.iter() {
                            let mut text = format_number(rec.get(crop));
                            if ui
                                .add(egui::TextEdit::singleline(&mut text).desired_width(90.0))
                                .changed()
                            {
                                edits.push(GridEdit::Value {
                                    year: rec.year,
                                    crop: crop.to_string(),
                                    text,
                                });
                            }
                        }
                        if ui.small_button("✕").on_hover_text("Delete").clicked() {
                            edits.push(GridEdit::RemoveYear(rec.year));
                        }
                        ui.end_row();
                    }
                });
            });

            for edit in edits {
                self.state = match edit {
                    GridEdit::Value { year, crop, text } => {
                        self.state.set_value(year, &crop, &text)
                    }
                    GridEdit::RemoveYear(year) => self.state.remove_year(year),
                };
            }
        });
    }

    fn chart_section(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width().max(1.0) as u32;
        let height = CHART_HEIGHT as u32;

        let has_frame = match self.chart.refresh(&self.state, width, height) {
            Ok(frame) => frame.is_some(),
            Err(err) => {
                log::error!("chart render failed: {err:#}");
                false
            }
        };

        if !has_frame {
            self.chart_texture = None;
            if self.state.data.is_empty() {
                ui.group(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("No Data Available");
                        ui.label(
                            "Add data using the input form above or load example data to see the visualization.",
                        );
                        if ui.button("Load Example Data").clicked() {
                            self.load_example();
                        }
                    });
                });
            }
            return;
        }

        let generation = self.chart.generation();
        let stale = self
            .chart_texture
            .as_ref()
            .is_none_or(|(g, _)| *g != generation);
        if stale {
            if let Some(frame) = self.chart.frame() {
                let image = egui::ColorImage::from_rgb(
                    [frame.width as usize, frame.height as usize],
                    &frame.pixels,
                );
                let texture = ui
                    .ctx()
                    .load_texture("chart", image, egui::TextureOptions::LINEAR);
                self.chart_texture = Some((generation, texture));
            }
        }
        if let Some((_, texture)) = &self.chart_texture {
            ui.image((texture.id(), texture.size_vec2()));
        }
    }

    /// Ctrl+V with nothing focused pastes straight into the table.
    fn handle_global_paste(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }
        let pasted = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Paste(text) => Some(text.clone()),
                _ => None,
            })
        });
        if let Some(text) = pasted {
            self.paste_text(&text);
        }
    }
}

impl eframe::App for CropstatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_global_paste(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(self.state.heading());
                    ui.label("Visualize and analyze agricultural data trends over time");
                });
                ui.add_space(10.0);

                self.input_section(ui);

                // Status messages
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }

                ui.add_space(10.0);
                self.table_section(ui);
                ui.add_space(10.0);
                self.chart_section(ui);
            });
        });
    }
}
