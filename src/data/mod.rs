/// Data layer: core types, loading, selectors and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └───────────────┘
///        │            ┌───────────┐
///        │   ◄──────  │ selection │  SiteChoice, PayloadRange
///        ▼            └───────────┘
///   ┌───────────┐
///   │ aggregate │  → BreakdownTable, DistributionTable
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod selection;
