/// Data layer: cell types, loading, cleaning, filtering, projection, writing.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first sheet → Vec<RawRow> (blank rows dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ cleaner   │  drop nulls, find marker row → HeaderRow + CleanedRows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  column = value (text / integer / date) → matching rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ projector │  output column names → OutputTable
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  bordered .xlsx on disk
///   └──────────┘
/// ```

pub mod cleaner;
pub mod filter;
pub mod loader;
pub mod model;
pub mod projector;
pub mod writer;
