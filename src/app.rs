use eframe::egui;
use excel_filter::TableSettings;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExcelFilterApp {
    pub state: AppState,
}

impl ExcelFilterApp {
    pub fn new(settings: TableSettings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for ExcelFilterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: filter form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::filter_form(ui, &mut self.state);
        });
    }
}
