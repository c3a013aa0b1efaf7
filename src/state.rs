use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::data::filter::{filter_and_aggregate, FilterOutcome, Selection};
use crate::data::loader::load_table;
use crate::data::model::SupplierTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Normalized table, parsed once and shared read-only.
    pub table: Arc<SupplierTable>,

    /// File and sheet the table was read from.
    pub source: PathBuf,
    pub sheet: String,

    /// This session's filter choices.
    pub selection: Selection,

    /// Result for the current selection (cached between frames).
    pub outcome: FilterOutcome,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: Arc<SupplierTable>, source: PathBuf, sheet: String) -> Self {
        Self {
            table,
            source,
            sheet,
            selection: Selection::default(),
            outcome: FilterOutcome::NothingSelected,
            status_message: None,
        }
    }

    /// Recompute `outcome` from the table and the current selection.
    pub fn refilter(&mut self) {
        self.outcome = filter_and_aggregate(&self.table, &self.selection);
    }

    /// Replace the selection with a fresh one.
    pub fn reset_filters(&mut self) {
        self.selection = Selection::reset();
        self.refilter();
    }

    /// Re-read the current source, dropping the cached table.
    pub fn reload(&mut self) {
        let path = self.source.clone();
        self.open(&path);
    }

    /// Switch to another workbook. On failure the current table is kept.
    pub fn open(&mut self, path: &Path) {
        match self.try_open(path) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn try_open(&mut self, path: &Path) -> Result<()> {
        let table = load_table(path, &self.sheet)?;
        self.table = Arc::new(table);
        self.source = path.to_path_buf();
        self.refilter();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{grid, HEADER};
    use crate::data::normalize::normalize;

    fn state() -> AppState {
        let g = grid(&[
            &HEADER,
            &["Finance", "Risk", "SaaS", "Enterprise", "APRA", "AcmeGRC", "Yes", "3m", "100k", "50k"],
            &["Health", "Audit", "On-prem", "Mid-market", "Privacy", "CareGRC", "No", "6m", "20k", "10k"],
        ]);
        let table = normalize(&g).expect("normalize");
        AppState::new(Arc::new(table), PathBuf::from("in-memory.csv"), "Sheet1".into())
    }

    #[test]
    fn reset_clears_selection_and_result() {
        let mut st = state();
        st.selection.segment = "Finance".into();
        st.refilter();
        assert!(matches!(&st.outcome, FilterOutcome::Matches(t) if t.len() == 1));

        st.reset_filters();
        assert_eq!(st.selection, Selection::default());
        assert_eq!(st.outcome, FilterOutcome::NothingSelected);
    }

    #[test]
    fn failed_reload_keeps_the_table() {
        let mut st = state();
        st.open(Path::new("missing/suppliers.xlsx"));

        assert_eq!(st.table.len(), 2);
        assert_eq!(st.source, PathBuf::from("in-memory.csv"));
        assert!(st.status_message.is_some());
    }

    #[test]
    fn sessions_share_the_table_but_not_selections() {
        let a = state();
        let mut b = AppState::new(Arc::clone(&a.table), a.source.clone(), a.sheet.clone());
        b.selection.modules.insert("Audit".into());
        b.refilter();

        assert!(Arc::ptr_eq(&a.table, &b.table));
        assert_eq!(a.selection, Selection::default());
        assert!(matches!(&b.outcome, FilterOutcome::Matches(t) if t.rows[0].supplier == "CareGRC"));
    }
}
