use eframe::egui::{self, Color32, RichText, Ui};
use excel_filter::FilterKind;

use crate::state::{AppState, Notice, NoticeLevel};

// ---------------------------------------------------------------------------
// Central panel – filter form
// ---------------------------------------------------------------------------

/// Render the filter form: source, column, value, output columns, actions.
pub fn filter_form(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("filter_form")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            if ui.button("Open file").clicked() {
                open_file_dialog(state);
            }
            let source = state
                .source_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "No file selected".to_string());
            ui.label(source);
            ui.end_row();

            ui.label("Filter column:");
            ui.text_edit_singleline(&mut state.filter_column);
            ui.end_row();

            ui.label("Value type:");
            egui::ComboBox::from_id_salt("filter_kind")
                .selected_text(state.filter_kind.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in FilterKind::ALL {
                        ui.selectable_value(&mut state.filter_kind, kind, kind.to_string());
                    }
                });
            ui.end_row();

            ui.label("Filter value:");
            match state.filter_kind {
                FilterKind::Date => {
                    ui.add(egui_extras::DatePickerButton::new(&mut state.filter_date));
                }
                FilterKind::Text | FilterKind::Integer => {
                    ui.text_edit_singleline(&mut state.filter_text);
                }
            }
            ui.end_row();

            ui.label("Output columns\n(one per line):");
            ui.text_edit_multiline(&mut state.output_columns);
            ui.end_row();

            if ui.button("Save as").clicked() {
                save_file_dialog(state);
            }
            // Runs on the UI thread; the window does not repaint until it returns.
            if ui.button("Start").clicked() {
                let notice = state.start_processing();
                show_notice(&notice);
            }
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu and the status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save as…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(RichText::new(format!("Status: {}", state.status)).color(Color32::DARK_GREEN));
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Excel file")
        .add_filter("Excel files", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Source file selected: {}", path.display());
        state.set_source(path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save as")
        .add_filter("Excel files", &["xlsx"])
        .set_file_name("filtered.xlsx")
        .save_file();

    if let Some(path) = file {
        state.set_save_target(&path);
    }
}

fn show_notice(notice: &Notice) {
    let level = match notice.level {
        NoticeLevel::Info => rfd::MessageLevel::Info,
        NoticeLevel::Warning => rfd::MessageLevel::Warning,
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(&notice.title)
        .set_description(&notice.message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
