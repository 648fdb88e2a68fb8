/// Data layer: core types, loading, filtering and summaries.
///
/// Architecture:
/// ```text
///  SQLite movies table / .csv export
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  SELECT * → parse-or-missing → MovieTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ MovieTable │  Vec<MovieRecord>, genre index
///   └────────────┘
///      │      │
///      ▼      ▼
///   ┌────────┐ ┌───────────┐
///   │ filter │ │ aggregate │  criteria → indices  /  full-table summaries
///   └────────┘ └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
