/// Data layer: core types, loading, date normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (raw timestamps)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  raw timestamp → parsed | unparsed | missing
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  status selection → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs + chart tables → Summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
