use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, preview};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TabReportApp {
    pub state: AppState,
}

impl eframe::App for TabReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, load trigger, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: report & chart builder ----
        egui::SidePanel::left("builder_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::builder_panel(ui, &mut self.state);
            });

        // ---- Central panel: report table | chart preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                preview::report_table(&mut columns[0], &self.state);
                preview::chart_pane(&mut columns[1], &self.state);
            });
        });
    }
}
