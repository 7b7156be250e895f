use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – first record is the header row
/// * `.xlsx` / `.xls` – first worksheet, first row is the header row
///
/// Text-typed columns are trimmed and title-cased before the dataset is
/// handed to the rest of the application.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xls" => load_excel(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Dataset::from_rows(headers, rows))
}

/// Guess a cell's type from its raw CSV text: integer, then float, then
/// boolean literal; empty means null; everything else stays text.
fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    if trimmed == "true" || trimmed == "false" {
        return CellValue::Bool(trimmed == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

fn load_excel(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).context("opening Excel workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first worksheet")?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows: Vec<Vec<CellValue>> = sheet_rows
        .map(|row| row.iter().map(excel_cell_value).collect())
        .collect();

    Ok(Dataset::from_rows(headers, rows))
}

fn excel_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_load_guesses_types_and_normalizes_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "orders.csv",
            "Region,Quantity,Discount\n  east ,10,0.1\nWEST,5,\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.kinds[0], ColumnKind::Text);
        assert_eq!(ds.kinds[1], ColumnKind::Numeric);
        assert_eq!(ds.rows[0][0], CellValue::Text("East".into()));
        assert_eq!(ds.rows[1][0], CellValue::Text("West".into()));
        assert_eq!(ds.rows[0][1], CellValue::Integer(10));
        assert_eq!(ds.rows[0][2], CellValue::Float(0.1));
        assert!(ds.rows[1][2].is_null());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn cell_type_guessing() {
        assert_eq!(guess_cell_type("42"), CellValue::Integer(42));
        assert_eq!(guess_cell_type("4.25"), CellValue::Float(4.25));
        assert_eq!(guess_cell_type("true"), CellValue::Bool(true));
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("East"), CellValue::Text("East".into()));
    }
}
