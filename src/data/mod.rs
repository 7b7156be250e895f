/// Data layer: core types, loading, and report building.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, normalize text columns → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  rows × columns, per-column kinds, option lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  group by × aggregate × sort desc → Report
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod report;
