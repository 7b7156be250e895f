use std::path::PathBuf;

use eframe::egui;

use crate::chart::{render_chart, ChartStyle, RenderedChart};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::report::{build_report, Aggregation, Report, ReportSpec};
use crate::export;

// ---------------------------------------------------------------------------
// Status messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Status / error message shown in the top bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  Single-document model:
/// one dataset, one report, one chart live at a time.
pub struct AppState {
    /// Source file picked in the dialog (None until the user browses).
    pub source_path: Option<PathBuf>,

    /// Loaded dataset (None until a successful load).
    pub dataset: Option<Dataset>,

    /// Report-builder selections; empty string means "nothing picked yet".
    pub group_column: String,
    pub aggregation: Option<Aggregation>,
    pub value_column: String,

    /// Chart style selection.
    pub chart_style: ChartStyle,

    /// Last previewed report (superseded by the next preview).
    pub report: Option<Report>,

    /// Last rendered chart and its GPU texture for the preview pane.
    pub chart: Option<RenderedChart>,
    pub chart_texture: Option<egui::TextureHandle>,

    /// Status / error message shown in the UI.
    pub status: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_path: None,
            dataset: None,
            group_column: String::new(),
            aggregation: None,
            value_column: String::new(),
            chart_style: ChartStyle::Bar,
            report: None,
            chart: None,
            chart_texture: None,
            status: None,
        }
    }
}

impl AppState {
    /// Record the file picked in the dialog (FileSelected).
    pub fn set_source(&mut self, path: PathBuf) {
        self.source_path = Some(path);
        self.status = None;
    }

    /// Parse the selected file into a fresh dataset (DataLoaded).  A failed
    /// load keeps the previous dataset intact.
    pub fn load_dataset(&mut self) {
        let Some(path) = self.source_path.clone() else {
            self.status = Some(StatusMessage::error("Select a file first."));
            return;
        };

        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows x {} columns from {}",
                    dataset.n_rows(),
                    dataset.n_cols(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status = Some(StatusMessage::error(format!("Error: {e:#}")));
            }
        }
    }

    /// Ingest a newly loaded dataset, resetting all derived state.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let rows = dataset.n_rows();
        let cols = dataset.n_cols();

        self.group_column.clear();
        self.aggregation = None;
        self.value_column.clear();
        self.chart_style = ChartStyle::Bar;
        self.report = None;
        self.chart = None;
        self.chart_texture = None;

        self.dataset = Some(dataset);
        self.status = Some(StatusMessage::info(format!(
            "Loaded {rows} rows, {cols} columns."
        )));
    }

    /// Build a new report from the current selections (ReportBuilt).
    pub fn preview_report(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.status = Some(StatusMessage::error("Load a dataset first."));
            return;
        };
        let Some(aggregation) = self.aggregation else {
            self.status = Some(StatusMessage::error("Select all report options."));
            return;
        };

        let spec = ReportSpec {
            group_by: self.group_column.clone(),
            aggregation,
            value: self.value_column.clone(),
        };

        match build_report(dataset, &spec) {
            Ok(report) => {
                log::info!(
                    "Built report: {} by {} ({} groups)",
                    spec.value,
                    spec.group_by,
                    report.len()
                );
                let groups = report.len();
                self.report = Some(report);
                self.chart_style = ChartStyle::Bar;
                self.status = Some(StatusMessage::info(format!("Report ready: {groups} groups.")));
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    /// Write the current report as `<basename>_report.xlsx`.
    pub fn export_report(&mut self) {
        let Some(report) = &self.report else {
            self.status = Some(StatusMessage::error("No report to export."));
            return;
        };
        let Some(source) = &self.source_path else {
            self.status = Some(StatusMessage::error("Select a file first."));
            return;
        };

        let path = export::report_path(source);
        match export::spreadsheet::write_report(report, &path) {
            Ok(()) => {
                log::info!("Report exported to {}", path.display());
                self.status = Some(StatusMessage::info(format!(
                    "Report exported: {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Report export failed: {e:#}");
                self.status = Some(StatusMessage::error(format!("Error: {e:#}")));
            }
        }
    }

    /// Render the chart for the current report and style (ChartBuilt),
    /// releasing the previous preview texture before replacing it.
    pub fn preview_chart(&mut self, ctx: &egui::Context) {
        let Some(report) = &self.report else {
            self.status = Some(StatusMessage::error("Generate report first."));
            return;
        };

        match render_chart(report, self.chart_style) {
            Ok(chart) => {
                let size = [chart.image.width() as usize, chart.image.height() as usize];
                let color_image = egui::ColorImage::from_rgb(size, chart.image.as_raw());

                // Drop the old texture before allocating the new one.
                self.chart_texture = None;
                self.chart_texture = Some(ctx.load_texture(
                    "chart_preview",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.chart = Some(chart);
                self.status = Some(StatusMessage::info(format!(
                    "{} chart ready.",
                    self.chart_style
                )));
            }
            Err(e) if e.is_warning() => {
                self.status = Some(StatusMessage::warning(e.to_string()));
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    /// Write the current chart as `<basename>_chart.png`.
    pub fn export_chart(&mut self) {
        let Some(chart) = &self.chart else {
            self.status = Some(StatusMessage::error("No chart to export."));
            return;
        };
        let Some(source) = &self.source_path else {
            self.status = Some(StatusMessage::error("Select a file first."));
            return;
        };

        let path = export::chart_path(source);
        match export::image::write_chart(chart, &path) {
            Ok(()) => {
                log::info!("Chart exported to {}", path.display());
                self.status = Some(StatusMessage::info(format!(
                    "Chart exported: {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Chart export failed: {e:#}");
                self.status = Some(StatusMessage::error(format!("Error: {e:#}")));
            }
        }
    }
}
