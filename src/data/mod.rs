/// Data layer: launch records, loading, and the filter/aggregate engine.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (validated)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site / booster indices
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (site, payload range) → pie table / scatter rows
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
