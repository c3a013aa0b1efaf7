mod app;
mod config;
mod data;
mod state;
mod ui;


use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use app::SupplierFinderApp;
use config::Settings;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::load(Path::new(config::SETTINGS_FILE))?;

    // Without a table there is nothing to show: a load failure ends the process.
    let table = data::loader::load_table(&settings.workbook, &settings.sheet)?;
    let state = AppState::new(Arc::new(table), settings.workbook, settings.sheet);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GRC Supplier Finder",
        options,
        Box::new(move |_cc| Ok(Box::new(SupplierFinderApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
