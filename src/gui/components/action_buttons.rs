// src/gui/components/action_buttons.rs
use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let launch = ui.add_enabled(app.can_launch(), egui::Button::new("1. Launch Chrome"));
        if launch.clicked() {
            actions::launch(app);
        }

        let download = ui.add_enabled(
            app.can_download(),
            egui::Button::new(egui::RichText::new("2. Download & Rename Receipts").strong()),
        );
        if download.clicked() {
            actions::download(app);
        }

        if app.launching || app.running {
            ui.add(Spinner::new().size(16.0));
        }
    });

    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            actions::reset(app);
        }
        if ui.button("Stop and Exit").clicked() {
            logf!("UI: Stop and Exit");
            app.stop.raise();
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}
