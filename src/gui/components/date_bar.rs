// src/gui/components/date_bar.rs
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::{config::consts::ROW_DATE_FORMAT, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let gui = &mut app.state.gui;
    let before = (gui.start_date, gui.end_date);

    ui.add_enabled_ui(!app.running, |ui| {
        ui.horizontal(|ui| {
            ui.label("Download receipts from:");
            ui.add(DatePickerButton::new(&mut gui.start_date)
                .id_salt("start_date")
                .format(ROW_DATE_FORMAT));
            ui.label("to:");
            ui.add(DatePickerButton::new(&mut gui.end_date)
                .id_salt("end_date")
                .format(ROW_DATE_FORMAT));
        });
    });

    if (gui.start_date, gui.end_date) != before {
        logd!("UI: range → {}..={}", gui.start_date, gui.end_date);
    }
}
