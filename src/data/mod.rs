/// Data layer: raw loading, cleaning, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (untyped cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  project → year filter → sex filter → round → rename → localize
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ CanonicalTable  │  immutable, source order
///   └────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group-by-sum views for the charts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod labels;
pub mod loader;
pub mod model;
pub mod pipeline;
