use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::model::{RawGrid, SupplierTable};
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize the supplier sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – the named sheet is read
/// * `.csv` – the whole file is the sheet; `sheet` is ignored
pub fn load_table(path: &Path, sheet: &str) -> Result<SupplierTable> {
    let grid = read_grid(path, sheet)?;
    let table = normalize(&grid)
        .with_context(|| format!("normalizing sheet '{sheet}' of {}", path.display()))?;
    log::info!(
        "Loaded {} rows ({} suppliers) from {}",
        table.len(),
        table.supplier_count(),
        path.display()
    );
    Ok(table)
}

/// Read the raw cell grid without any interpretation.
pub fn read_grid(path: &Path, sheet: &str) -> Result<RawGrid> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet),
        "csv" => read_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Workbook reader
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path, sheet: &str) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook: {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("failed to read sheet: {sheet}"))?;

    Ok(range
        .rows()
        .map(|r| r.iter().map(cell_text).collect())
        .collect())
}

/// Convert a workbook cell to text. Empty cells (and empty strings, as the
/// sheet's merged regions sometimes store them) become `None`.
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(v) => v.clone(),
        Data::Float(v) => format_float(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.clone(),
        Data::DurationIso(v) => v.clone(),
        Data::Error(v) => format!("{v:?}"),
    };
    (!text.is_empty()).then_some(text)
}

/// Whole numbers render without a fractional part (`1000`, not `1000.0`).
fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout mirrors the sheet: no fixed header position, ragged rows
/// allowed, empty fields are missing cells.
fn read_csv(path: &Path) -> Result<RawGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let mut grid = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        grid.push(
            record
                .iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect(),
        );
    }
    Ok(grid)
}
