// src/gui/actions/download.rs
use std::thread;

use crate::{
    config::options::RunOptions,
    core::pdf::LopdfText,
    gui::{app::App, progress::{ChannelProgress, UiEvent}},
    progress::Progress,
    receipts::{DateRange, FsDownloadDir, pipeline},
};

/// Hand the session to a worker thread and run the whole pipeline there.
pub fn download(app: &mut App) {
    if !app.can_download() {
        return;
    }

    let range = match DateRange::checked(app.state.gui.start_date, app.state.gui.end_date) {
        Ok(r) => r,
        Err(e) => {
            app.log(format!(" ERROR: {e}"));
            return;
        }
    };

    let Some(mut session) = app.live_session() else {
        app.log(" ERROR: The browser is not running. Please launch it first.");
        return;
    };

    let mut opts = RunOptions::new(range);
    opts.download_dir = app.state.browser.download_dir.clone();

    app.running = true;
    app.progress_done = 0;
    app.progress_max = 0;

    let tx = app.tx.clone();
    let stop = app.stop.clone();

    app.worker = Some(thread::spawn(move || {
        let mut progress = ChannelProgress::new(tx.clone());
        let result = match FsDownloadDir::open(&opts.download_dir) {
            Ok(dir) => pipeline::run(&mut *session, &dir, &LopdfText, &opts, &mut progress, &stop)
                .map(|_| ()),
            Err(e) => {
                progress.log(&format!(" ERROR: Cannot use {}: {e}", opts.download_dir.display()));
                progress.finish();
                Err(e.into())
            }
        };
        if let Err(e) = result {
            loge!("Run: failed: {e}");
        }
        let _ = tx.send(UiEvent::RunDone(session));
    }));
}
