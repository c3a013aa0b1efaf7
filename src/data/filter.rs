use std::collections::{BTreeMap, BTreeSet};

use super::model::{AggregatedRow, AggregatedTable, Attribute, Detail, SupplierRecord, SupplierTable};

/// Separator used when merging a supplier's detail values.
pub const DETAIL_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Selection – per-session filter choices
// ---------------------------------------------------------------------------

/// The user's current choices. An empty string (or empty module set) means
/// "no constraint" for that attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub segment: String,
    pub modules: BTreeSet<String>,
    pub hosting: String,
    pub orientation: String,
    pub regulatory_focus: String,
}

impl Selection {
    /// A fresh selection with nothing chosen.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Mutable access to a single-select attribute. `None` for the
    /// multi-select modules attribute.
    pub fn single_mut(&mut self, attr: Attribute) -> Option<&mut String> {
        match attr {
            Attribute::Segment => Some(&mut self.segment),
            Attribute::Modules => None,
            Attribute::Hosting => Some(&mut self.hosting),
            Attribute::Orientation => Some(&mut self.orientation),
            Attribute::RegulatoryFocus => Some(&mut self.regulatory_focus),
        }
    }

    fn single(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Segment => Some(self.segment.as_str()),
            Attribute::Modules => None,
            Attribute::Hosting => Some(self.hosting.as_str()),
            Attribute::Orientation => Some(self.orientation.as_str()),
            Attribute::RegulatoryFocus => Some(self.regulatory_focus.as_str()),
        }
    }

    /// Predicates for every attribute that currently constrains the result.
    pub fn active_predicates(&self) -> Vec<Predicate> {
        Attribute::ALL
            .into_iter()
            .filter_map(|attr| match self.single(attr) {
                Some("") => None,
                Some(value) => Some(Predicate::Equals(attr, value.to_string())),
                None if self.modules.is_empty() => None,
                None => Some(Predicate::OneOf(attr, self.modules.clone())),
            })
            .collect()
    }

    /// Human-readable list of active filters as (column label, value).
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        self.active_predicates()
            .into_iter()
            .map(|p| match p {
                Predicate::Equals(attr, value) => (attr.column(), value),
                Predicate::OneOf(attr, values) => (attr.column(), join_sorted(&values)),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Attribute value equals the selection exactly (no case folding).
    Equals(Attribute, String),
    /// Attribute value is one of the selected set.
    OneOf(Attribute, BTreeSet<String>),
}

impl Predicate {
    pub fn matches(&self, table: &SupplierTable, rec: &SupplierRecord) -> bool {
        match self {
            Predicate::Equals(attr, want) => table.attribute(rec, *attr) == Some(want.as_str()),
            Predicate::OneOf(attr, set) => table
                .attribute(rec, *attr)
                .is_some_and(|v| set.contains(v)),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering and aggregation
// ---------------------------------------------------------------------------

/// Outcome of one recomputation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No filter is active; the user should pick something first.
    NothingSelected,
    /// Filters are active. An empty table means nothing matched.
    Matches(AggregatedTable),
}

/// Records satisfying every predicate.
pub fn filter_records<'a>(
    table: &'a SupplierTable,
    predicates: &[Predicate],
) -> Vec<&'a SupplierRecord> {
    table
        .records
        .iter()
        .filter(|rec| predicates.iter().all(|p| p.matches(table, rec)))
        .collect()
}

/// Group records by supplier and merge each detail column into a sorted,
/// deduplicated, comma-joined string. Rows come out sorted by supplier.
pub fn aggregate(table: &SupplierTable, records: &[&SupplierRecord]) -> AggregatedTable {
    let mut groups: BTreeMap<&str, [BTreeSet<&str>; 4]> = BTreeMap::new();

    for rec in records {
        let sets = groups.entry(table.supplier(rec)).or_default();
        for (set, detail) in sets.iter_mut().zip(Detail::ALL) {
            if let Some(v) = table.detail(rec, detail) {
                if !v.trim().is_empty() {
                    set.insert(v);
                }
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(supplier, sets)| AggregatedRow {
            supplier: supplier.to_string(),
            details: sets.map(|s| s.into_iter().collect::<Vec<_>>().join(DETAIL_SEPARATOR)),
        })
        .collect();

    AggregatedTable { rows }
}

/// Filter the table by the selection and aggregate the survivors.
pub fn filter_and_aggregate(table: &SupplierTable, selection: &Selection) -> FilterOutcome {
    let predicates = selection.active_predicates();
    if predicates.is_empty() {
        return FilterOutcome::NothingSelected;
    }
    let records = filter_records(table, &predicates);
    log::debug!(
        "{} predicate(s) kept {} of {} rows",
        predicates.len(),
        records.len(),
        table.len()
    );
    FilterOutcome::Matches(aggregate(table, &records))
}

fn join_sorted(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(DETAIL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{grid, HEADER};
    use crate::data::normalize::normalize;

    fn sample_table() -> SupplierTable {
        let g = grid(&[
            &HEADER,
            &["Finance", "Risk", "SaaS", "Enterprise", "APRA", "AcmeGRC", "Yes", "3m", "100k", "50k"],
            &["Finance", "Audit", "SaaS", "Enterprise", "APRA", "AcmeGRC", "Yes", "6m", "100k", "60k"],
            &["Finance", "Audit", "On-prem", "Mid-market", "ASIC", "BetaRisk", "No", "3m", "", ""],
            &["Health", "Risk", "SaaS", "Enterprise", "Privacy", "CareGRC", "Partial", "9m", "250k", "80k"],
            &["Health", "Policy", "", "", "", "AcmeGRC", "", "", "", ""],
        ]);
        normalize(&g).expect("sample table should normalize")
    }

    fn select(segment: &str, modules: &[&str]) -> Selection {
        Selection {
            segment: segment.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            ..Selection::default()
        }
    }

    fn matches(outcome: FilterOutcome) -> AggregatedTable {
        match outcome {
            FilterOutcome::Matches(t) => t,
            FilterOutcome::NothingSelected => panic!("expected an aggregation"),
        }
    }

    #[test]
    fn empty_selection_reports_nothing_selected() {
        let table = sample_table();
        assert_eq!(
            filter_and_aggregate(&table, &Selection::default()),
            FilterOutcome::NothingSelected
        );
    }

    #[test]
    fn single_select_is_exact_equality() {
        let table = sample_table();
        let result = matches(filter_and_aggregate(&table, &select("Finance", &[])));
        let names: Vec<&str> = result.rows.iter().map(|r| r.supplier.as_str()).collect();
        assert_eq!(names, ["AcmeGRC", "BetaRisk"]);

        let result = matches(filter_and_aggregate(&table, &select("finance", &[])));
        assert!(result.is_empty());
    }

    #[test]
    fn module_filter_is_membership() {
        let table = sample_table();
        let predicates = select("", &["Audit"]).active_predicates();
        let rows = filter_records(&table, &predicates);
        assert_eq!(rows.len(), 2);
        for rec in rows {
            assert_eq!(table.attribute(rec, Attribute::Modules), Some("Audit"));
        }

        let predicates = select("", &["Audit", "Policy"]).active_predicates();
        assert_eq!(filter_records(&table, &predicates).len(), 3);
    }

    #[test]
    fn duplicate_detail_values_collapse() {
        let table = sample_table();
        let result = matches(filter_and_aggregate(&table, &select("Finance", &["Risk", "Audit"])));
        let acme = &result.rows[0];
        assert_eq!(acme.supplier, "AcmeGRC");
        assert_eq!(acme.detail(Detail::AuSupport), "Yes");
        assert_eq!(acme.detail(Detail::ImplTime), "3m, 6m");
        assert_eq!(acme.detail(Detail::ProjBudget), "100k");
        assert_eq!(acme.detail(Detail::LicBudget), "50k, 60k");
    }

    #[test]
    fn aggregated_details_match_filtered_rows() {
        let table = sample_table();
        let predicates = select("Health", &[]).active_predicates();
        let rows = filter_records(&table, &predicates);
        let result = aggregate(&table, &rows);

        for out in &result.rows {
            for detail in Detail::ALL {
                let expected: BTreeSet<&str> = rows
                    .iter()
                    .filter(|r| table.supplier(r) == out.supplier)
                    .filter_map(|r| table.detail(r, detail))
                    .filter(|v| !v.trim().is_empty())
                    .collect();
                let expected = expected.into_iter().collect::<Vec<_>>().join(", ");
                assert_eq!(out.detail(detail), expected);
            }
        }
    }

    #[test]
    fn adding_a_predicate_never_grows_the_result() {
        let table = sample_table();
        let mut selection = select("", &["Risk", "Audit"]);
        let before = filter_records(&table, &selection.active_predicates()).len();

        selection.hosting = "SaaS".to_string();
        let after_hosting = filter_records(&table, &selection.active_predicates()).len();
        assert!(after_hosting <= before);

        selection.segment = "Finance".to_string();
        let after_segment = filter_records(&table, &selection.active_predicates()).len();
        assert!(after_segment <= after_hosting);
    }

    #[test]
    fn no_match_keeps_the_table_shape() {
        let table = sample_table();
        let mut selection = select("Health", &[]);
        selection.orientation = "Mid-market".to_string();

        let result = matches(filter_and_aggregate(&table, &selection));
        assert!(result.is_empty());
        assert_eq!(AggregatedTable::HEADERS.len(), 1 + Detail::ALL.len());
    }

    #[test]
    fn unknown_value_yields_no_matches() {
        let table = sample_table();
        let result = matches(filter_and_aggregate(&table, &select("Retail", &[])));
        assert!(result.is_empty());
    }

    #[test]
    fn reset_returns_to_nothing_selected() {
        let table = sample_table();
        let mut selection = select("Finance", &["Audit"]);
        selection.regulatory_focus = "APRA".to_string();
        assert_eq!(selection.active_predicates().len(), 3);

        selection = Selection::reset();
        assert_eq!(selection.segment, "");
        assert!(selection.modules.is_empty());
        assert_eq!(selection.hosting, "");
        assert_eq!(selection.orientation, "");
        assert_eq!(selection.regulatory_focus, "");
        assert_eq!(
            filter_and_aggregate(&table, &selection),
            filter_and_aggregate(&table, &Selection::default())
        );
    }

    #[test]
    fn summary_lists_active_filters_in_order() {
        let mut selection = select("Finance", &["Risk", "Audit"]);
        selection.regulatory_focus = "APRA".to_string();

        assert_eq!(
            selection.summary(),
            vec![
                ("Segment", "Finance".to_string()),
                ("Modules(tags)", "Audit, Risk".to_string()),
                ("Regulatory focus (typical)", "APRA".to_string()),
            ]
        );
    }
}
