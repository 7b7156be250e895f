use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::RenderedChart;

// ---------------------------------------------------------------------------
// Chart → .png
// ---------------------------------------------------------------------------

/// Save the rendered chart's pixel buffer as a PNG file, overwriting any
/// existing file at `path`.
pub fn write_chart(chart: &RenderedChart, path: &Path) -> Result<()> {
    chart
        .image
        .save(path)
        .with_context(|| format!("saving chart PNG to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartStyle, RenderedChart, render::{CHART_HEIGHT, CHART_WIDTH}};
    use image::RgbImage;

    #[test]
    fn chart_is_written_as_png() {
        let chart = RenderedChart {
            style: ChartStyle::Bar,
            image: RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, image::Rgb([255, 255, 255])),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders_chart.png");
        write_chart(&chart, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (CHART_WIDTH, CHART_HEIGHT));
    }
}
