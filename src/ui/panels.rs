use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartStyle;
use crate::data::report::Aggregation;
use crate::state::{AppState, StatusLevel};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.source_path {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name);
            }
            None => {
                ui.label("No file selected");
            }
        }

        if ui.button("Load").clicked() {
            state.load_dataset();
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} rows, {} columns", ds.n_rows(), ds.n_cols()));
            ui.separator();
        }

        if let Some(msg) = &state.status {
            let color = match msg.level {
                StatusLevel::Info => Color32::from_rgb(110, 190, 120),
                StatusLevel::Warning => Color32::GOLD,
                StatusLevel::Error => Color32::RED,
            };
            ui.label(RichText::new(&msg.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – report and chart builder
// ---------------------------------------------------------------------------

/// Render the left builder panel: dataset summary, report selections,
/// chart style, and the preview/export actions.
pub fn builder_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Report Builder");
    ui.separator();

    // Clone the option lists so we can mutate state inside the widgets.
    let (summary, group_options, value_options) = match &state.dataset {
        Some(ds) => (ds.summary(), ds.text_columns(), ds.value_columns()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Dataset");
            ui.label(summary);
            ui.separator();

            ui.strong("Group by column");
            let group_text = if state.group_column.is_empty() {
                "–"
            } else {
                state.group_column.as_str()
            };
            egui::ComboBox::from_id_salt("group_by")
                .selected_text(group_text.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &group_options {
                        ui.selectable_value(&mut state.group_column, col.clone(), col);
                    }
                });

            ui.strong("Aggregation");
            let agg_text = state
                .aggregation
                .map(|a| a.to_string())
                .unwrap_or_else(|| "–".to_string());
            egui::ComboBox::from_id_salt("aggregation")
                .selected_text(agg_text)
                .show_ui(ui, |ui: &mut Ui| {
                    for agg in Aggregation::ALL {
                        ui.selectable_value(&mut state.aggregation, Some(agg), agg.to_string());
                    }
                });

            ui.strong("Value column");
            let value_text = if state.value_column.is_empty() {
                "–"
            } else {
                state.value_column.as_str()
            };
            egui::ComboBox::from_id_salt("value_column")
                .selected_text(value_text.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &value_options {
                        ui.selectable_value(&mut state.value_column, col.clone(), col);
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Preview Report").clicked() {
                    state.preview_report();
                }
                if ui.button("Export Report").clicked() {
                    state.export_report();
                }
            });

            ui.separator();

            ui.strong("Chart type");
            egui::ComboBox::from_id_salt("chart_style")
                .selected_text(state.chart_style.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for style in ChartStyle::ALL {
                        ui.selectable_value(&mut state.chart_style, style, style.to_string());
                    }
                });

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Preview Chart").clicked() {
                    let ctx = ui.ctx().clone();
                    state.preview_chart(&ctx);
                }
                if ui.button("Export Chart").clicked() {
                    state.export_chart();
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tabular data")
        .add_filter("Supported files", &["csv", "xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Selected {}", path.display());
        state.set_source(path);
    }
}
