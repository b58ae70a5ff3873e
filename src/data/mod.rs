/// Data layer: tabular model, named-table store, and event loading.
///
/// Architecture:
/// ```text
///  .csv event file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (typed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  TableStore   │  named tables, "df" = working table
///   └──────────────┘
///        │
///        ▼
///   gates / rules / transforms (sibling modules)
/// ```
pub mod loader;
pub mod store;
pub mod table;
