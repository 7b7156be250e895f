use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Aggregation – the supported aggregate functions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
    Max,
    Min,
    Count,
    Median,
}

impl Aggregation {
    /// All variants, in the order offered by the UI.
    pub const ALL: [Aggregation; 6] = [
        Aggregation::Sum,
        Aggregation::Mean,
        Aggregation::Max,
        Aggregation::Min,
        Aggregation::Count,
        Aggregation::Median,
    ];

    /// Reduce a group's numeric values (nulls already filtered out).
    fn apply(&self, values: &[f64]) -> f64 {
        match self {
            Aggregation::Sum => values.iter().sum(),
            Aggregation::Count => values.len() as f64,
            Aggregation::Mean => {
                if values.is_empty() {
                    f64::NAN
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            Aggregation::Max => values.iter().copied().fold(f64::NAN, f64::max),
            Aggregation::Min => values.iter().copied().fold(f64::NAN, f64::min),
            Aggregation::Median => median(values),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Max => "max",
            Aggregation::Min => "min",
            Aggregation::Count => "count",
            Aggregation::Median => "median",
        };
        write!(f, "{name}")
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ---------------------------------------------------------------------------
// ReportSpec / Report
// ---------------------------------------------------------------------------

/// The user's three report selections.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    pub group_by: String,
    pub aggregation: Aggregation,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Select all report options.")]
    MissingSelection,
    #[error("Column '{0}' does not exist in the dataset.")]
    UnknownColumn(String),
}

/// One output row: a distinct grouping key and its aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub key: CellValue,
    pub value: f64,
}

/// A grouped-and-aggregated derived table.  Keys are unique; rows are sorted
/// non-increasing by aggregate value.
#[derive(Debug, Clone)]
pub struct Report {
    pub group_column: String,
    pub value_column: String,
    pub aggregation: Aggregation,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Group the dataset by `spec.group_by`, aggregate `spec.value` with
/// `spec.aggregation`, and sort descending by the aggregate.
///
/// Groups are formed in row-encounter order and the sort is stable, so tied
/// aggregates keep encounter order (implementation-defined, not guaranteed).
/// Null cells in the value column create/extend their group but contribute
/// nothing to the aggregate.
pub fn build_report(dataset: &Dataset, spec: &ReportSpec) -> Result<Report, ReportError> {
    if spec.group_by.is_empty() || spec.value.is_empty() {
        return Err(ReportError::MissingSelection);
    }
    let group_idx = dataset
        .column_index(&spec.group_by)
        .ok_or_else(|| ReportError::UnknownColumn(spec.group_by.clone()))?;
    let value_idx = dataset
        .column_index(&spec.value)
        .ok_or_else(|| ReportError::UnknownColumn(spec.value.clone()))?;

    // Encounter-order grouping: ordered keys + index map into group buckets.
    let mut order: Vec<CellValue> = Vec::new();
    let mut groups: HashMap<CellValue, Vec<f64>> = HashMap::new();

    for row in &dataset.rows {
        let key = &row[group_idx];
        if !groups.contains_key(key) {
            order.push(key.clone());
        }
        let bucket = groups.entry(key.clone()).or_default();
        if let Some(v) = row[value_idx].as_f64() {
            bucket.push(v);
        }
    }

    let mut rows: Vec<ReportRow> = order
        .into_iter()
        .map(|key| {
            let value = spec.aggregation.apply(&groups[&key]);
            ReportRow { key, value }
        })
        .collect();

    rows.sort_by(|a, b| b.value.total_cmp(&a.value));

    Ok(Report {
        group_column: spec.group_by.clone(),
        value_column: spec.value.clone(),
        aggregation: spec.aggregation,
        rows,
    })
}

/// Format an aggregate for display: whole numbers without a fraction,
/// everything else with two decimals.
pub fn format_aggregate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    fn orders() -> Dataset {
        Dataset::from_rows(
            vec!["Region".into(), "Quantity".into()],
            vec![
                vec![CellValue::Text("East".into()), CellValue::Integer(10)],
                vec![CellValue::Text("West".into()), CellValue::Integer(5)],
                vec![CellValue::Text("East".into()), CellValue::Integer(3)],
            ],
        )
    }

    fn spec(agg: Aggregation) -> ReportSpec {
        ReportSpec {
            group_by: "Region".into(),
            aggregation: agg,
            value: "Quantity".into(),
        }
    }

    #[test]
    fn sum_by_region_is_sorted_descending() {
        let report = build_report(&orders(), &spec(Aggregation::Sum)).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].key, CellValue::Text("East".into()));
        assert_eq!(report.rows[0].value, 13.0);
        assert_eq!(report.rows[1].key, CellValue::Text("West".into()));
        assert_eq!(report.rows[1].value, 5.0);
    }

    #[test]
    fn keys_are_distinct_group_values() {
        let report = build_report(&orders(), &spec(Aggregation::Count)).unwrap();
        let keys: Vec<String> = report.rows.iter().map(|r| r.key.to_string()).collect();
        let mut deduped = keys.clone();
        deduped.dedup();
        assert_eq!(keys, deduped);
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn aggregate_column_is_non_increasing() {
        let report = build_report(&orders(), &spec(Aggregation::Mean)).unwrap();
        for pair in report.rows.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
    }

    #[test]
    fn all_aggregations_over_one_group() {
        let ds = Dataset::from_rows(
            vec!["Region".into(), "Quantity".into()],
            vec![
                vec![CellValue::Text("East".into()), CellValue::Integer(1)],
                vec![CellValue::Text("East".into()), CellValue::Integer(2)],
                vec![CellValue::Text("East".into()), CellValue::Integer(3)],
                vec![CellValue::Text("East".into()), CellValue::Integer(10)],
            ],
        );
        let value_of = |agg| build_report(&ds, &spec(agg)).unwrap().rows[0].value;
        assert_eq!(value_of(Aggregation::Sum), 16.0);
        assert_eq!(value_of(Aggregation::Mean), 4.0);
        assert_eq!(value_of(Aggregation::Max), 10.0);
        assert_eq!(value_of(Aggregation::Min), 1.0);
        assert_eq!(value_of(Aggregation::Count), 4.0);
        // Even-length median averages the middle pair.
        assert_eq!(value_of(Aggregation::Median), 2.5);
    }

    #[test]
    fn null_values_extend_groups_but_not_aggregates() {
        let ds = Dataset::from_rows(
            vec!["Region".into(), "Quantity".into()],
            vec![
                vec![CellValue::Text("East".into()), CellValue::Integer(4)],
                vec![CellValue::Text("North".into()), CellValue::Null],
            ],
        );
        let report = build_report(&ds, &spec(Aggregation::Sum)).unwrap();
        assert_eq!(report.rows.len(), 2);
        let north = report
            .rows
            .iter()
            .find(|r| r.key == CellValue::Text("North".into()))
            .unwrap();
        assert_eq!(north.value, 0.0);
    }

    #[test]
    fn validation_errors() {
        let ds = orders();
        let missing = ReportSpec {
            group_by: String::new(),
            aggregation: Aggregation::Sum,
            value: "Quantity".into(),
        };
        assert!(matches!(
            build_report(&ds, &missing),
            Err(ReportError::MissingSelection)
        ));

        let unknown = ReportSpec {
            group_by: "Region".into(),
            aggregation: Aggregation::Sum,
            value: "Revenue".into(),
        };
        assert!(matches!(
            build_report(&ds, &unknown),
            Err(ReportError::UnknownColumn(_))
        ));
    }

    #[test]
    fn aggregate_formatting() {
        assert_eq!(format_aggregate(13.0), "13");
        assert_eq!(format_aggregate(2.5), "2.50");
    }
}
