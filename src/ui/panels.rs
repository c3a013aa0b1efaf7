use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Attribute, SupplierTable};
use crate::state::AppState;

/// Entry shown for "no constraint" in the single-select boxes.
const ANY: &str = "(any)";

// ---------------------------------------------------------------------------
// Left side panel – strategic filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Strategic Filters");
    ui.separator();

    // The table is shared; hold our own handle so the selection can be
    // mutated while options are borrowed.
    let table = Arc::clone(&state.table);
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for attr in Attribute::ALL {
                match state.selection.single_mut(attr) {
                    Some(current) => {
                        ui.strong(attr.control_label());
                        changed |= single_select(ui, &table, attr, current);
                    }
                    None => {
                        let selected = &mut state.selection.modules;
                        let n_total = table.options(attr).count();
                        ui.strong(format!(
                            "{}  ({}/{n_total})",
                            attr.control_label(),
                            selected.len()
                        ));
                        changed |= multi_select(ui, &table, attr, selected);
                    }
                }
                ui.add_space(6.0);
            }

            ui.separator();
            if ui.button("Reset All Filters").clicked() {
                state.reset_filters();
                changed = false;
            }
        });

    if changed {
        state.refilter();
    }
}

/// Combo box with an empty entry followed by the sorted options.
/// Returns whether the choice changed.
fn single_select(ui: &mut Ui, table: &SupplierTable, attr: Attribute, current: &mut String) -> bool {
    let before = current.clone();
    let shown = if current.is_empty() { ANY } else { current.as_str() };

    egui::ComboBox::from_id_salt(attr.column())
        .selected_text(shown)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut *current, String::new(), ANY);
            for opt in table.options(attr) {
                ui.selectable_value(&mut *current, opt.to_string(), opt);
            }
        });

    *current != before
}

/// Checkbox list for the multi-select attribute.
fn multi_select(
    ui: &mut Ui,
    table: &SupplierTable,
    attr: Attribute,
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;
    for opt in table.options(attr) {
        let mut checked = selected.contains(opt);
        if ui.checkbox(&mut checked, opt).changed() {
            if checked {
                selected.insert(opt.to_string());
            } else {
                selected.remove(opt);
            }
            changed = true;
        }
    }
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let file_name = state
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.label(format!(
            "{} rows, {} suppliers ({file_name})",
            state.table.len(),
            state.table.supplier_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open supplier workbook")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
