use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
/// Report grouping keys by `CellValue`, so it must be `Eq + Ord + Hash`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord/Hash so CellValue can key group maps --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as an `f64` for aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – per-column type classification
// ---------------------------------------------------------------------------

/// Classification of a column by its non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
    Bool,
    /// Every cell in the column is null.
    Empty,
}

/// Classify a column from one cell per row (nulls are ignored).
pub fn classify_column<'a>(cells: impl Iterator<Item = &'a CellValue>) -> ColumnKind {
    let mut saw_any = false;
    let mut all_numeric = true;
    let mut all_bool = true;

    for cell in cells.filter(|c| !c.is_null()) {
        saw_any = true;
        match cell {
            CellValue::Integer(_) | CellValue::Float(_) => all_bool = false,
            CellValue::Bool(_) => all_numeric = false,
            CellValue::Text(_) => {
                all_numeric = false;
                all_bool = false;
            }
            CellValue::Null => {}
        }
    }

    if !saw_any {
        ColumnKind::Empty
    } else if all_numeric {
        ColumnKind::Numeric
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Numeric business columns that make sense to aggregate.  Identifier-like
/// numeric columns (order numbers, zip codes) are deliberately excluded.
pub const VALUE_COLUMN_ALLOWLIST: [&str; 3] = ["Quantity", "Unit_Price", "Discount"];

/// The full parsed table with per-column type classification.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Ordered header row.
    pub columns: Vec<String>,
    /// Row-major cells; every row has `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
    /// One kind per column, same order as `columns`.
    pub kinds: Vec<ColumnKind>,
}

impl Dataset {
    /// Build a dataset from headers and rectangular rows, classifying each
    /// column and normalizing text columns in place (trim + title case).
    pub fn from_rows(columns: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let n_cols = columns.len();
        for row in &mut rows {
            row.resize(n_cols, CellValue::Null);
        }

        let kinds: Vec<ColumnKind> = (0..n_cols)
            .map(|c| classify_column(rows.iter().map(|row| &row[c])))
            .collect();

        let mut dataset = Dataset {
            columns,
            rows,
            kinds,
        };
        dataset.normalize_text_columns();
        dataset
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Candidate group-by columns: all text-typed columns, in table order.
    pub fn text_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.kinds.iter())
            .filter(|(_, kind)| **kind == ColumnKind::Text)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Candidate value columns: the allow-list restricted to columns that
    /// are actually present, in allow-list order.
    pub fn value_columns(&self) -> Vec<String> {
        VALUE_COLUMN_ALLOWLIST
            .iter()
            .filter(|name| self.column_index(name).is_some())
            .map(|name| name.to_string())
            .collect()
    }

    /// Summary text for the dataset information pane.
    pub fn summary(&self) -> String {
        format!(
            "Rows: {}\nColumns: {}\nColumn Names:\n{}",
            self.n_rows(),
            self.n_cols(),
            self.columns.join(", ")
        )
    }

    /// Trim and title-case every cell of every text-typed column, coercing
    /// stray non-text cells in those columns to their string form.  Grouping
    /// must not treat `"acme"` and `"ACME "` as distinct categories.
    fn normalize_text_columns(&mut self) {
        for (c, kind) in self.kinds.iter().enumerate() {
            if *kind != ColumnKind::Text {
                continue;
            }
            for row in &mut self.rows {
                if row[c].is_null() {
                    continue;
                }
                let text = row[c].to_string();
                row[c] = CellValue::Text(title_case(text.trim()));
            }
        }
    }
}

/// Title-case a string: the first alphabetic character of each word is
/// uppercased, the rest lowercased, with word boundaries at any
/// non-alphabetic character.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words_and_boundaries() {
        assert_eq!(title_case("acme corp"), "Acme Corp");
        assert_eq!(title_case("ACME CORP"), "Acme Corp");
        assert_eq!(title_case("north-east region"), "North-East Region");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn classify_by_cell_contents() {
        let numeric = vec![CellValue::Integer(1), CellValue::Float(2.5), CellValue::Null];
        assert_eq!(classify_column(numeric.iter()), ColumnKind::Numeric);

        let text = vec![CellValue::Text("a".into()), CellValue::Integer(1)];
        assert_eq!(classify_column(text.iter()), ColumnKind::Text);

        let empty = vec![CellValue::Null, CellValue::Null];
        assert_eq!(classify_column(empty.iter()), ColumnKind::Empty);
    }

    #[test]
    fn text_columns_are_normalized_on_construction() {
        let ds = Dataset::from_rows(
            vec!["Region".into(), "Quantity".into()],
            vec![
                vec![CellValue::Text("  east ".into()), CellValue::Integer(10)],
                vec![CellValue::Text("EAST".into()), CellValue::Integer(3)],
            ],
        );
        assert_eq!(ds.rows[0][0], CellValue::Text("East".into()));
        assert_eq!(ds.rows[1][0], CellValue::Text("East".into()));
        // Numeric column untouched
        assert_eq!(ds.rows[0][1], CellValue::Integer(10));
    }

    #[test]
    fn option_lists_follow_kind_and_allowlist() {
        let ds = Dataset::from_rows(
            vec!["Region".into(), "Quantity".into(), "Order_Id".into()],
            vec![vec![
                CellValue::Text("East".into()),
                CellValue::Integer(10),
                CellValue::Integer(10001),
            ]],
        );
        assert_eq!(ds.text_columns(), vec!["Region".to_string()]);
        // Order_Id is numeric but not allow-listed
        assert_eq!(ds.value_columns(), vec!["Quantity".to_string()]);
    }

    #[test]
    fn ragged_rows_are_padded_with_nulls() {
        let ds = Dataset::from_rows(
            vec!["A".into(), "B".into()],
            vec![vec![CellValue::Integer(1)]],
        );
        assert_eq!(ds.rows[0].len(), 2);
        assert!(ds.rows[0][1].is_null());
    }

    #[test]
    fn summary_lists_shape_and_names() {
        let ds = Dataset::from_rows(
            vec!["Region".into(), "Quantity".into()],
            vec![vec![CellValue::Text("East".into()), CellValue::Integer(1)]],
        );
        let summary = ds.summary();
        assert!(summary.contains("Rows: 1"));
        assert!(summary.contains("Columns: 2"));
        assert!(summary.contains("Region, Quantity"));
    }
}
