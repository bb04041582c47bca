// src/gui/actions/reset.rs
use crate::gui::app::App;

/// Clear the log and the bar; drop a session whose window was closed.
pub fn reset(app: &mut App) {
    app.log_lines.clear();
    app.progress_done = 0;
    if !app.running {
        app.progress_max = 0;
        if app.session.is_some() {
            app.session = app.live_session();
        }
    }
    app.log(" Application state has been reset.");
    logf!("UI: reset (session={})", app.session.is_some());
}
