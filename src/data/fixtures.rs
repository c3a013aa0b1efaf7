//! Shared test helpers for building raw sheets.

use super::model::RawGrid;

/// Header row in sheet order, supplier in the middle as in the real workbook.
pub const HEADER: [&str; 10] = [
    "Segment",
    "Modules(tags)",
    "Hosting",
    "Orientation",
    "Regulatory focus (typical)",
    "Supplier / Product",
    "AU support",
    "Impl",
    "Proj$",
    "Lic$ (p.a.)",
];

/// Build a grid from string rows; `""` becomes a missing cell.
pub fn grid(rows: &[&[&str]]) -> RawGrid {
    rows.iter()
        .map(|r| {
            r.iter()
                .map(|c| (!c.is_empty()).then(|| c.to_string()))
                .collect()
        })
        .collect()
}
