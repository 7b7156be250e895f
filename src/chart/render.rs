use anyhow::anyhow;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use thiserror::Error;

use crate::color::chart_palette;
use crate::data::report::Report;

// ---------------------------------------------------------------------------
// Chart styles and constraints
// ---------------------------------------------------------------------------

/// Fixed canvas size shared by the preview texture and the PNG export.
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 500;

/// Pie wedges stop being legible beyond this many categories.
pub const PIE_CATEGORY_LIMIT: usize = 8;

const LINE_COLOR: RGBColor = RGBColor(42, 100, 246);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    /// Horizontal bars, largest value nearest the top.
    Bar,
    /// Vertical bars, report order left to right.
    Column,
    /// Connected markers, report order.
    Line,
    /// Proportional wedges with percentage labels.
    Pie,
}

impl ChartStyle {
    /// All styles, in the order offered by the UI.
    pub const ALL: [ChartStyle; 4] = [
        ChartStyle::Bar,
        ChartStyle::Column,
        ChartStyle::Line,
        ChartStyle::Pie,
    ];
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartStyle::Bar => "Bar",
            ChartStyle::Column => "Column",
            ChartStyle::Line => "Line",
            ChartStyle::Pie => "Pie",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Report has no rows to chart.")]
    EmptyReport,
    #[error(
        "Pie charts work best with {} or fewer categories (report has {count}).",
        PIE_CATEGORY_LIMIT
    )]
    TooManyCategories { count: usize },
    #[error("Pie charts need a positive total ({total} is not).")]
    NonPositiveTotal { total: f64 },
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

impl ChartError {
    /// Warnings block a single render attempt without being fatal.
    pub fn is_warning(&self) -> bool {
        matches!(self, ChartError::TooManyCategories { .. })
    }
}

/// A rendered chart: an owned RGB pixel buffer at the fixed canvas size.
#[derive(Debug)]
pub struct RenderedChart {
    pub style: ChartStyle,
    pub image: RgbImage,
}

// ---------------------------------------------------------------------------
// Rendering entry point
// ---------------------------------------------------------------------------

/// Render the report with the given style onto a fresh canvas.
pub fn render_chart(report: &Report, style: ChartStyle) -> Result<RenderedChart, ChartError> {
    if report.is_empty() {
        return Err(ChartError::EmptyReport);
    }
    if style == ChartStyle::Pie {
        if report.len() > PIE_CATEGORY_LIMIT {
            return Err(ChartError::TooManyCategories {
                count: report.len(),
            });
        }
        let total: f64 = report.rows.iter().map(|r| r.value.max(0.0)).sum();
        if !(total > 0.0) {
            return Err(ChartError::NonPositiveTotal { total });
        }
    }

    let mut buf = vec![255u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    draw(report, style, &mut buf)?;

    let image = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buf)
        .ok_or_else(|| ChartError::Render(anyhow!("pixel buffer size mismatch")))?;

    Ok(RenderedChart { style, image })
}

fn draw(report: &Report, style: ChartStyle, buf: &mut [u8]) -> anyhow::Result<()> {
    let root = BitMapBackend::with_buffer(buf, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    match style {
        ChartStyle::Bar => draw_bar(report, &root)?,
        ChartStyle::Column => draw_column(report, &root)?,
        ChartStyle::Line => draw_line(report, &root)?,
        ChartStyle::Pie => draw_pie(report, &root)?,
    }

    root.present()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-style renderers
// ---------------------------------------------------------------------------

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn category_label(report: &Report, i: usize) -> String {
    report
        .rows
        .get(i)
        .map(|r| r.key.to_string())
        .unwrap_or_default()
}

/// Value-axis range: always spans zero, padded 5% above the extremes.
fn value_range(report: &Report) -> (f64, f64) {
    let max = report
        .rows
        .iter()
        .map(|r| r.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let min = report
        .rows
        .iter()
        .map(|r| r.value)
        .fold(f64::INFINITY, f64::min);

    let mut hi = max.max(0.0);
    let lo = min.min(0.0);
    if !(hi > lo) {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo, hi + pad)
}

fn draw_column(report: &Report, root: &Canvas<'_>) -> anyhow::Result<()> {
    let n = report.len();
    let (lo, hi) = value_range(report);
    let colors = chart_palette(n);

    let mut chart = ChartBuilder::on(root)
        .caption("Column Chart", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d((0..n).into_segmented(), lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n + 1)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => category_label(report, *i),
            _ => String::new(),
        })
        .y_desc(report.value_column.as_str())
        .draw()?;

    chart.draw_series(report.rows.iter().enumerate().map(|(i, row)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), row.value),
            ],
            colors[i % colors.len()].filled(),
        )
    }))?;

    Ok(())
}

fn draw_bar(report: &Report, root: &Canvas<'_>) -> anyhow::Result<()> {
    let n = report.len();
    let (lo, hi) = value_range(report);
    let colors = chart_palette(n);

    let mut chart = ChartBuilder::on(root)
        .caption("Bar Chart", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(36)
        .y_label_area_size(110)
        .build_cartesian_2d(lo..hi, (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n + 1)
        // Report row 0 holds the largest value; slot n-1 is nearest the top.
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(j) if *j < n => category_label(report, n - 1 - j),
            _ => String::new(),
        })
        .x_desc(report.value_column.as_str())
        .draw()?;

    chart.draw_series(report.rows.iter().enumerate().map(|(i, row)| {
        let slot = n - 1 - i;
        Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot)),
                (row.value, SegmentValue::Exact(slot + 1)),
            ],
            colors[i % colors.len()].filled(),
        )
    }))?;

    Ok(())
}

fn draw_line(report: &Report, root: &Canvas<'_>) -> anyhow::Result<()> {
    let n = report.len();
    let (lo, hi) = value_range(report);

    let mut chart = ChartBuilder::on(root)
        .caption("Line Chart", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), lo..hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            let i = x.round();
            if (x - i).abs() < 0.25 && i >= 0.0 && (i as usize) < n {
                category_label(report, i as usize)
            } else {
                String::new()
            }
        })
        .y_desc(report.value_column.as_str())
        .draw()?;

    chart.draw_series(LineSeries::new(
        report
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.value)),
        LINE_COLOR.stroke_width(2),
    ))?;

    chart.draw_series(
        report
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| Circle::new((i as f64, row.value), 4, LINE_COLOR.filled())),
    )?;

    Ok(())
}

fn draw_pie(report: &Report, root: &Canvas<'_>) -> anyhow::Result<()> {
    let n = report.len();
    let values: Vec<f64> = report.rows.iter().map(|r| r.value.max(0.0)).collect();
    let total: f64 = values.iter().sum();
    let colors = chart_palette(n);

    let center = (CHART_WIDTH as i32 / 2, CHART_HEIGHT as i32 / 2 + 14);
    let radius = 170.0_f64;

    let title_style = TextStyle::from(("sans-serif", 28).into_font()).color(&BLACK);
    root.draw_text("Pie Chart", &title_style, (CHART_WIDTH as i32 / 2 - 52, 12))?;

    let pct_style = TextStyle::from(("sans-serif", 16).into_font()).color(&BLACK);
    let label_style = TextStyle::from(("sans-serif", 18).into_font()).color(&BLACK);

    // Wedges start at 12 o'clock and sweep clockwise.
    let mut start = -90.0_f64;
    for (i, (row, &value)) in report.rows.iter().zip(values.iter()).enumerate() {
        let sweep = value / total * 360.0;
        root.draw(&Polygon::new(
            wedge_points(center, radius, start, sweep),
            colors[i % colors.len()].filled(),
        ))?;

        let mid = (start + sweep / 2.0).to_radians();
        let pct = value / total * 100.0;
        let px = center.0 + (radius * 0.55 * mid.cos()) as i32;
        let py = center.1 + (radius * 0.55 * mid.sin()) as i32;
        root.draw_text(&format!("{pct:.1}%"), &pct_style, (px - 18, py - 8))?;

        let lx = center.0 + (radius * 1.12 * mid.cos()) as i32;
        let ly = center.1 + (radius * 1.12 * mid.sin()) as i32;
        let label = row.key.to_string();
        let offset = if mid.cos() < 0.0 {
            // Left half: right-align roughly by width.
            -(label.len() as i32 * 8)
        } else {
            0
        };
        root.draw_text(&label, &label_style, (lx + offset, ly - 9))?;

        start += sweep;
    }

    Ok(())
}

fn wedge_points(center: (i32, i32), radius: f64, start_deg: f64, sweep_deg: f64) -> Vec<(i32, i32)> {
    let steps = 100;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = (start_deg + sweep_deg * i as f64 / steps as f64).to_radians();
        points.push((
            center.0 + (radius * angle.cos()) as i32,
            center.1 + (radius * angle.sin()) as i32,
        ));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::report::{Aggregation, ReportRow};

    fn report_with(n: usize) -> Report {
        Report {
            group_column: "Region".into(),
            value_column: "Quantity".into(),
            aggregation: Aggregation::Sum,
            rows: (0..n)
                .map(|i| ReportRow {
                    key: CellValue::Text(format!("Group {i}")),
                    value: (n - i) as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn pie_rejects_more_than_eight_categories() {
        let err = render_chart(&report_with(9), ChartStyle::Pie).unwrap_err();
        assert!(matches!(err, ChartError::TooManyCategories { count: 9 }));
        assert!(err.is_warning());
    }

    #[test]
    fn pie_rejects_non_positive_total() {
        let mut report = report_with(2);
        report.rows[0].value = 0.0;
        report.rows[1].value = -3.0;
        let err = render_chart(&report, ChartStyle::Pie).unwrap_err();
        assert!(matches!(err, ChartError::NonPositiveTotal { .. }));
        assert!(!err.is_warning());
    }

    #[test]
    fn empty_report_is_rejected_for_every_style() {
        for style in ChartStyle::ALL {
            let err = render_chart(&report_with(0), style).unwrap_err();
            assert!(matches!(err, ChartError::EmptyReport));
            assert!(!err.is_warning());
        }
    }

    #[test]
    fn wedge_polygon_closes_around_the_center() {
        let points = wedge_points((100, 100), 50.0, -90.0, 180.0);
        assert_eq!(points[0], (100, 100));
        // Start of the arc is straight up from the center.
        assert_eq!(points[1], (100, 50));
        assert_eq!(points.len(), 102);
    }

    #[test]
    fn value_range_spans_zero() {
        let report = report_with(3);
        let (lo, hi) = value_range(&report);
        assert_eq!(lo, 0.0);
        assert!(hi > 3.0);
    }
}
