use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::report::format_aggregate;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Report preview table (central panel, left half)
// ---------------------------------------------------------------------------

pub fn report_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Report Preview");
    ui.separator();

    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Build a report to preview it here.");
        });
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(report.group_column.as_str());
            });
            header.col(|ui| {
                ui.strong(format!("{} ({})", report.value_column, report.aggregation));
            });
        })
        .body(|body| {
            body.rows(18.0, report.rows.len(), |mut row| {
                let entry = &report.rows[row.index()];
                row.col(|ui| {
                    ui.label(entry.key.to_string());
                });
                row.col(|ui| {
                    ui.label(format_aggregate(entry.value));
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Chart preview pane (central panel, right half)
// ---------------------------------------------------------------------------

pub fn chart_pane(ui: &mut Ui, state: &AppState) {
    ui.heading("Chart Preview");
    ui.separator();

    match &state.chart_texture {
        Some(texture) => {
            ui.add(egui::Image::new(texture).shrink_to_fit());
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Preview a chart to see it here.");
            });
        }
    }
}
