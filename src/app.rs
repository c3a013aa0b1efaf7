use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SupplierFinderApp {
    pub state: AppState,
}

impl SupplierFinderApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SupplierFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: matching suppliers ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::results_view(ui, &self.state);
        });
    }
}
