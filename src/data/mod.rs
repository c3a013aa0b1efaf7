/// Data layer: sheet model, loading, normalization and filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read cells → RawGrid
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  header by content, forward-fill, drop totals → SupplierTable
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → predicates → AggregatedTable per supplier
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;

#[cfg(test)]
pub(crate) mod fixtures;
