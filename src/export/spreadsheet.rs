use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::data::report::Report;

// ---------------------------------------------------------------------------
// Report → .xlsx
// ---------------------------------------------------------------------------

/// Write the report to a single-sheet workbook: a header row with the two
/// column names, then one row per group (key as text, aggregate as number).
/// An existing file at `path` is overwritten.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet
        .write_string(0, 0, &report.group_column)
        .context("writing header row")?;
    sheet
        .write_string(0, 1, &report.value_column)
        .context("writing header row")?;

    for (i, row) in report.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet
            .write_string(r, 0, row.key.to_string())
            .with_context(|| format!("writing group key at row {r}"))?;
        sheet
            .write_number(r, 1, row.value)
            .with_context(|| format!("writing aggregate at row {r}"))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("saving workbook to {}", path.display()))?;
    Ok(())
}
