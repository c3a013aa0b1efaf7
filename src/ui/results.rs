use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{FilterOutcome, Selection};
use crate::data::model::{AggregatedTable, Detail};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results (central panel)
// ---------------------------------------------------------------------------

/// Render the active filters and the matching suppliers.
pub fn results_view(ui: &mut Ui, state: &AppState) {
    if let Some(line) = active_filters_line(&state.selection) {
        ui.strong("Active Strategic Filters");
        ui.label(line);
        ui.separator();
    }

    ui.heading("Matching Suppliers & Details");
    ui.add_space(4.0);

    match &state.outcome {
        FilterOutcome::NothingSelected => {
            ui.label(
                RichText::new(
                    "Please select at least one strategic criterion to filter the suppliers.",
                )
                .color(Color32::LIGHT_BLUE),
            );
        }
        FilterOutcome::Matches(table) if table.is_empty() => {
            ui.label(
                RichText::new(
                    "No suppliers match your current strategic criteria. Please adjust your filters.",
                )
                .color(Color32::from_rgb(230, 160, 40)),
            );
        }
        FilterOutcome::Matches(table) => {
            ui.label(
                RichText::new(format!(
                    "Found {} unique supplier(s) matching your criteria. Details below:",
                    table.len()
                ))
                .color(Color32::from_rgb(90, 190, 110)),
            );
            ui.add_space(4.0);
            supplier_table(ui, table);
        }
    }
}

/// `Column: value` pairs joined with a bar, or `None` when nothing is active.
pub fn active_filters_line(selection: &Selection) -> Option<String> {
    let parts: Vec<String> = selection
        .summary()
        .into_iter()
        .map(|(column, value)| format!("{column}: {value}"))
        .collect();
    (!parts.is_empty()).then(|| parts.join("  |  "))
}

fn supplier_table(ui: &mut Ui, table: &AggregatedTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(220.0).at_least(120.0).clip(true))
        .columns(Column::auto().at_least(90.0), Detail::ALL.len() - 1)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for label in AggregatedTable::HEADERS {
                header.col(|ui| {
                    ui.strong(label);
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(20.0, |mut cells| {
                    cells.col(|ui| {
                        ui.label(row.supplier.as_str());
                    });
                    for detail in Detail::ALL {
                        cells.col(|ui| {
                            ui.label(row.detail(detail));
                        });
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_line_without_active_filters() {
        assert_eq!(active_filters_line(&Selection::default()), None);
    }

    #[test]
    fn line_joins_filters_with_bars() {
        let selection = Selection {
            hosting: "SaaS".into(),
            modules: ["Risk".to_string(), "Audit".to_string()].into_iter().collect(),
            ..Selection::default()
        };
        assert_eq!(
            active_filters_line(&selection).as_deref(),
            Some("Modules(tags): Audit, Risk  |  Hosting: SaaS")
        );
    }
}
