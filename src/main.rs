mod app;
mod state;
mod ui;

use app::ExcelFilterApp;
use eframe::egui;
use excel_filter::TableSettings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = TableSettings::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 380.0])
            .with_min_inner_size([420.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Excel Filter",
        options,
        Box::new(|_cc| Ok(Box::new(ExcelFilterApp::new(settings)))),
    )
}
