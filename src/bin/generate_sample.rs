//! Writes `sample_pivot.csv`, a supplier sheet laid out like the exported
//! pivot table: title rows, header, merged (blank) group cells, a repeated
//! row and a trailing grand total.

const HEADER: [&str; 10] = [
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

/// (supplier, AU support, impl, project budget, licence budget)
const SUPPLIERS: [(&str, &str, &str, &str, &str); 6] = [
    ("AcmeGRC", "Yes", "3-6 months", "100k-250k", "50k-100k"),
    ("BetaRisk", "No", "6-9 months", "250k+", "100k+"),
    ("CareGRC", "Partial", "1-3 months", "<100k", "<50k"),
    ("ComplyOne", "Yes", "1-3 months", "<100k", "50k-100k"),
    ("Ledgerline", "Yes", "9-12 months", "250k+", "100k+"),
    ("OpenAudit", "Partial", "3-6 months", "<100k", "<50k"),
];

/// (segment, hosting, orientation, regulatory focus)
const GROUPS: [(&str, &str, &str, &str); 3] = [
    ("Finance", "SaaS", "Enterprise", "APRA"),
    ("Health", "On-prem", "Mid-market", "Privacy"),
    ("Government", "Hybrid", "Enterprise", "PSPF"),
];

const MODULES: [&str; 4] = ["Risk", "Audit", "Policy", "Incident"];

fn blank_row() -> Vec<String> {
    vec![String::new(); HEADER.len()]
}

fn main() -> anyhow::Result<()> {
    let output_path = "sample_pivot.csv";
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)?;

    writer.write_record(["GRC Supplier Pivot"])?;
    writer.write_record(blank_row())?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for (g, (segment, hosting, orientation, reg)) in GROUPS.iter().enumerate() {
        for (m, module) in MODULES.iter().enumerate() {
            // Two or three suppliers per module, rotating through the list.
            let count = 2 + (g + m) % 2;
            for k in 0..count {
                let (supplier, au, imp, proj, lic) = SUPPLIERS[(g * 3 + m + k * 2) % SUPPLIERS.len()];
                let mut row = blank_row();
                // Merged cells: group values only on the first row of the block.
                if m == 0 && k == 0 {
                    row[0] = segment.to_string();
                    row[2] = hosting.to_string();
                    row[3] = orientation.to_string();
                    row[4] = reg.to_string();
                }
                if k == 0 {
                    row[1] = module.to_string();
                }
                row[5] = supplier.to_string();
                row[6] = au.to_string();
                row[7] = imp.to_string();
                row[8] = proj.to_string();
                row[9] = lic.to_string();
                writer.write_record(&row)?;
                rows += 1;

                // Repeat the first row of each block to exercise deduplication.
                if k == 0 && m == 1 {
                    writer.write_record(&row)?;
                    rows += 1;
                }
            }
        }
    }

    let mut total = blank_row();
    total[0] = "Grand Total".to_string();
    writer.write_record(&total)?;
    writer.flush()?;

    println!("Wrote {rows} supplier rows to {output_path}");
    Ok(())
}
