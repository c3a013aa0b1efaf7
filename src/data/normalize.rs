use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::model::{
    Attribute, ColumnIndex, Detail, RawGrid, SupplierRecord, SupplierTable, GRAND_TOTAL_MARKER,
    HEADER_MARKERS, SUPPLIER_COLUMN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("header row not found: no row contains all of [{markers}]")]
    HeaderNotFound { markers: String },

    #[error("header row has no '{0}' column")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Turn a raw sheet into the normalized supplier table.
///
/// Steps, in order:
/// 1. locate the header row by content (both [`HEADER_MARKERS`] present)
/// 2. take the rows below it as data, trimmed header cells as column names
/// 3. forward-fill the nine key columns to undo merged cells
/// 4. drop rows without a supplier, and summary ("Grand Total") rows
/// 5. trim the supplier and collapse exact duplicate rows
pub fn normalize(grid: &RawGrid) -> Result<SupplierTable, NormalizeError> {
    let header_idx = find_header_row(grid).ok_or_else(|| NormalizeError::HeaderNotFound {
        markers: HEADER_MARKERS.join(", "),
    })?;
    log::debug!("header row found at sheet row {header_idx}");

    let columns: Vec<String> = grid[header_idx]
        .iter()
        .map(|c| c.as_deref().unwrap_or_default().trim().to_string())
        .collect();
    let index = resolve_columns(&columns)?;

    // Pad short rows and cut overhanging cells so every row matches the header.
    let width = columns.len();
    let mut rows: Vec<Vec<Option<String>>> = grid[header_idx + 1..]
        .iter()
        .map(|r| {
            let mut r = r.clone();
            r.resize(width, None);
            r
        })
        .collect();

    let fill_cols: Vec<usize> = index
        .attributes
        .values()
        .copied()
        .chain(index.details)
        .collect();
    forward_fill(&mut rows, &fill_cols);

    let segment_col = index.attributes[&Attribute::Segment];
    let total_rows = rows.len();
    let mut blank = 0usize;
    let mut summary = 0usize;
    let mut seen: HashSet<SupplierRecord> = HashSet::new();
    let mut records = Vec::new();

    for mut cells in rows {
        let supplier = match cells[index.supplier].as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                blank += 1;
                continue;
            }
        };
        let segment_is_total = cells[segment_col].as_deref().is_some_and(is_grand_total);
        if is_grand_total(&supplier) || segment_is_total {
            summary += 1;
            continue;
        }
        cells[index.supplier] = Some(supplier);

        let rec = SupplierRecord { cells };
        if !seen.contains(&rec) {
            seen.insert(rec.clone());
            records.push(rec);
        }
    }

    log::info!(
        "normalized {} of {total_rows} data rows ({blank} without supplier, {summary} summary, {} duplicate)",
        records.len(),
        total_rows - blank - summary - records.len(),
    );

    Ok(SupplierTable::from_records(columns, records, index))
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Index of the first row holding both header markers as whole cell values.
pub fn find_header_row(grid: &RawGrid) -> Option<usize> {
    grid.iter().position(|row| {
        HEADER_MARKERS
            .iter()
            .all(|marker| row.iter().any(|c| c.as_deref() == Some(*marker)))
    })
}

/// Replace missing cells in `columns` with the closest non-missing value above.
///
/// Cells before the first value in a column stay missing. Running this twice
/// gives the same rows as running it once.
pub fn forward_fill(rows: &mut [Vec<Option<String>>], columns: &[usize]) {
    for &col in columns {
        let mut last: Option<String> = None;
        for row in rows.iter_mut() {
            let Some(cell) = row.get_mut(col) else {
                continue;
            };
            match cell {
                Some(v) => last = Some(v.clone()),
                None => *cell = last.clone(),
            }
        }
    }
}

/// Case-insensitive containment of the grand-total marker.
pub fn is_grand_total(cell: &str) -> bool {
    cell.to_ascii_lowercase()
        .contains(&GRAND_TOTAL_MARKER.to_ascii_lowercase())
}

fn resolve_columns(columns: &[String]) -> Result<ColumnIndex, NormalizeError> {
    let position = |label: &str| {
        columns
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| NormalizeError::MissingColumn(label.to_string()))
    };

    let attributes = Attribute::ALL
        .into_iter()
        .map(|a| Ok((a, position(a.column())?)))
        .collect::<Result<BTreeMap<_, _>, NormalizeError>>()?;

    let mut details = [0usize; 4];
    for (slot, d) in details.iter_mut().zip(Detail::ALL) {
        *slot = position(d.column())?;
    }

    Ok(ColumnIndex {
        supplier: position(SUPPLIER_COLUMN)?,
        attributes,
        details,
    })
}
