use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Raw sheet – untyped grid straight out of the workbook
// ---------------------------------------------------------------------------

/// Rows × columns of cell text. `None` is a missing (empty) cell.
pub type RawGrid = Vec<Vec<Option<String>>>;

/// Label of the supplier identity column.
pub const SUPPLIER_COLUMN: &str = "Supplier / Product";

/// Sentinel text marking spreadsheet summary rows.
pub const GRAND_TOTAL_MARKER: &str = "Grand Total";

/// Both labels must appear in a row for it to count as the header.
pub const HEADER_MARKERS: [&str; 2] = ["Segment", SUPPLIER_COLUMN];

// ---------------------------------------------------------------------------
// Attribute – a filterable grouping column
// ---------------------------------------------------------------------------

/// The five strategic grouping attributes a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Segment,
    Modules,
    Hosting,
    Orientation,
    RegulatoryFocus,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Segment,
        Attribute::Modules,
        Attribute::Hosting,
        Attribute::Orientation,
        Attribute::RegulatoryFocus,
    ];

    /// Column label in the source sheet.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Segment => "Segment",
            Attribute::Modules => "Modules(tags)",
            Attribute::Hosting => "Hosting",
            Attribute::Orientation => "Orientation",
            Attribute::RegulatoryFocus => "Regulatory focus (typical)",
        }
    }

    /// Label shown on the sidebar control.
    pub fn control_label(self) -> &'static str {
        match self {
            Attribute::Segment => "Segment",
            Attribute::Modules => "Module(s)",
            Attribute::Hosting => "Hosting",
            Attribute::Orientation => "Orientation",
            Attribute::RegulatoryFocus => "Regulatory Focus",
        }
    }
}

// ---------------------------------------------------------------------------
// Detail – display-only columns, aggregated per supplier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Detail {
    AuSupport,
    ImplTime,
    ProjBudget,
    LicBudget,
}

impl Detail {
    pub const ALL: [Detail; 4] = [
        Detail::AuSupport,
        Detail::ImplTime,
        Detail::ProjBudget,
        Detail::LicBudget,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Detail::AuSupport => "AU support",
            Detail::ImplTime => "Impl",
            Detail::ProjBudget => "Proj$",
            Detail::LicBudget => "Lic$ (p.a.)",
        }
    }

    /// Header used in the aggregated result table.
    pub const fn display_label(self) -> &'static str {
        match self {
            Detail::AuSupport => "AU Support",
            Detail::ImplTime => "Impl. Time",
            Detail::ProjBudget => "Proj. Budget",
            Detail::LicBudget => "Lic. Budget (p.a.)",
        }
    }

    fn position(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// SupplierRecord – one normalized data row
// ---------------------------------------------------------------------------

/// A normalized spreadsheet row. Holds every column of the sheet in header
/// order so that duplicate detection compares whole rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SupplierRecord {
    pub cells: Vec<Option<String>>,
}

impl SupplierRecord {
    pub fn get(&self, col: usize) -> Option<&str> {
        self.cells.get(col).and_then(|c| c.as_deref())
    }
}

// ---------------------------------------------------------------------------
// ColumnIndex – resolved positions of the columns the engine reads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub supplier: usize,
    pub attributes: BTreeMap<Attribute, usize>,
    pub details: [usize; 4],
}

// ---------------------------------------------------------------------------
// SupplierTable – the immutable normalized table
// ---------------------------------------------------------------------------

/// The normalized table plus per-attribute option lists.
#[derive(Debug, Clone)]
pub struct SupplierTable {
    /// Trimmed header labels, in sheet order.
    pub columns: Vec<String>,
    pub records: Vec<SupplierRecord>,
    pub index: ColumnIndex,
    /// For each attribute the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<Attribute, BTreeSet<String>>,
}

impl SupplierTable {
    /// Build the option index from already-normalized records.
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<SupplierRecord>,
        index: ColumnIndex,
    ) -> Self {
        let mut unique_values: BTreeMap<Attribute, BTreeSet<String>> = Attribute::ALL
            .into_iter()
            .map(|a| (a, BTreeSet::new()))
            .collect();

        for rec in &records {
            for (attr, &col) in &index.attributes {
                if let Some(val) = rec.get(col) {
                    unique_values
                        .entry(*attr)
                        .or_default()
                        .insert(val.to_string());
                }
            }
        }

        SupplierTable {
            columns,
            records,
            index,
            unique_values,
        }
    }

    pub fn attribute<'a>(&self, rec: &'a SupplierRecord, attr: Attribute) -> Option<&'a str> {
        self.index
            .attributes
            .get(&attr)
            .and_then(|&col| rec.get(col))
    }

    pub fn detail<'a>(&self, rec: &'a SupplierRecord, detail: Detail) -> Option<&'a str> {
        rec.get(self.index.details[detail.position()])
    }

    pub fn supplier<'a>(&self, rec: &'a SupplierRecord) -> &'a str {
        rec.get(self.index.supplier).unwrap_or_default()
    }

    /// Choices offered for an attribute, sorted.
    pub fn options(&self, attr: Attribute) -> impl Iterator<Item = &str> {
        self.unique_values
            .get(&attr)
            .into_iter()
            .flat_map(|vals| vals.iter().map(String::as_str))
    }

    /// Number of normalized rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct suppliers across the whole table.
    pub fn supplier_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| self.supplier(r))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

// ---------------------------------------------------------------------------
// Aggregated result
// ---------------------------------------------------------------------------

/// One supplier with its detail fields merged across matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub supplier: String,
    /// Indexed in [`Detail::ALL`] order.
    pub details: [String; 4],
}

impl AggregatedRow {
    pub fn detail(&self, detail: Detail) -> &str {
        &self.details[detail.position()]
    }
}

/// Result table. Its shape is fixed even when there are no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedTable {
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedTable {
    pub const HEADERS: [&'static str; 5] = [
        SUPPLIER_COLUMN,
        Detail::AuSupport.display_label(),
        Detail::ImplTime.display_label(),
        Detail::ProjBudget.display_label(),
        Detail::LicBudget.display_label(),
    ];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
