/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset (bad rows skipped)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site order, payload bounds
///   └───────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ aggregate │
///   └──────────┘          └───────────┘
///   site + payload          per-site success %
///   → scatter rows          or success/failure counts
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
