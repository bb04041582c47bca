// src/gui/components/log_panel.rs
use eframe::egui;

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &App) {
    let fraction = if app.progress_max == 0 {
        0.0
    } else {
        app.progress_done as f32 / app.progress_max as f32
    };
    ui.add(egui::ProgressBar::new(fraction).show_percentage());

    ui.add_space(6.0);
    ui.strong("Status Log:");

    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for line in &app.log_lines {
                ui.label(egui::RichText::new(line).monospace());
            }
        });
}
