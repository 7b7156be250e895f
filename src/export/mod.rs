/// Export layer: spreadsheet (report) and image (chart) writers, plus the
/// shared output-path convention: artifacts land next to the source file as
/// `<basename>_report.xlsx` and `<basename>_chart.png`, overwriting silently.
pub mod image;
pub mod spreadsheet;

use std::path::{Path, PathBuf};

/// `/data/orders.csv` → `/data/orders_report.xlsx`
pub fn report_path(source: &Path) -> PathBuf {
    sibling_with_suffix(source, "_report.xlsx")
}

/// `/data/orders.csv` → `/data/orders_chart.png`
pub fn chart_path(source: &Path) -> PathBuf {
    sibling_with_suffix(source, "_chart.png")
}

fn sibling_with_suffix(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    source.with_file_name(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_sit_next_to_the_source() {
        let source = Path::new("/data/orders.csv");
        assert_eq!(report_path(source), Path::new("/data/orders_report.xlsx"));
        assert_eq!(chart_path(source), Path::new("/data/orders_chart.png"));
    }

    #[test]
    fn extension_is_replaced_not_appended() {
        let source = Path::new("sales.xlsx");
        assert_eq!(report_path(source), Path::new("sales_report.xlsx"));
    }
}
