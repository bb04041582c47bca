// src/gui/components/instructions.rs
use eframe::egui;

const STEPS: &[&str] = &[
    "1. Click 'Launch Chrome'.",
    "2. In the new Chrome window, log in and display the list of receipts.",
    "3. In this app, select your desired date range below.",
    "4. Click 'Download & Rename Receipts'.",
];

pub fn draw(ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.strong("Instructions");
        for step in STEPS {
            ui.label(*step);
        }
    });
}
