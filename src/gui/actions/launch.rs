// src/gui/actions/launch.rs
use std::thread;

use crate::{
    browser::{SessionGuard, WebDriverSession},
    gui::{app::App, progress::UiEvent},
};

/// Start Chrome on a worker thread; the result arrives as `UiEvent::Launched`.
pub fn launch(app: &mut App) {
    if !app.can_launch() {
        return;
    }
    app.launching = true;
    app.log(" Launching controlled Chrome browser...");

    let opts = app.state.browser.clone();
    let tx = app.tx.clone();
    logf!("Browser: launch requested webdriver={}", opts.webdriver_url);

    app.worker = Some(thread::spawn(move || {
        let result = WebDriverSession::launch(&opts)
            .map(SessionGuard::new)
            .map_err(|e| e.to_string());
        let _ = tx.send(UiEvent::Launched(result));
    }));
}
