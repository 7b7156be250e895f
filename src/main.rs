mod app;
mod chart;
mod color;
mod data;
mod export;
mod state;
mod ui;

use app::TabReportApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 750.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tabreport – Report & Chart Builder",
        options,
        Box::new(|_cc| Ok(Box::new(TabReportApp::default()))),
    )
}
