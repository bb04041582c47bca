// src/gui/app.rs
use std::{
    error::Error,
    sync::mpsc::{self, Receiver, Sender},
    thread::JoinHandle,
    time::Duration,
};

use eframe::egui;

use crate::{
    browser::BrowserSession,
    config::{consts::LOG_POLL_MS, state::AppState},
    receipts::StopSignal,
};

use super::{
    components,
    progress::{Session, UiEvent},
};

pub fn run(state: AppState, options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "PLI Downloader & Renamer",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // the live browser; moves into the worker for a run
    pub session: Option<Session>,

    // workers → UI
    pub tx: Sender<UiEvent>,
    rx: Receiver<UiEvent>,

    pub log_lines: Vec<String>,
    pub progress_done: usize,
    pub progress_max: usize,

    pub launching: bool,
    pub running: bool,
    pub worker: Option<JoinHandle<()>>,
    pub stop: StopSignal,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let (tx, rx) = mpsc::channel();
        logf!("Init: downloads → {}", state.browser.download_dir.display());
        Self {
            state,
            session: None,
            tx,
            rx,
            log_lines: Vec::new(),
            progress_done: 0,
            progress_max: 0,
            launching: false,
            running: false,
            worker: None,
            stop: StopSignal::new(),
        }
    }

    #[inline]
    pub fn log<T: Into<String>>(&mut self, msg: T) {
        self.log_lines.push(msg.into());
    }

    #[inline]
    pub fn can_launch(&self) -> bool {
        !self.launching && !self.running && self.session.is_none()
    }

    #[inline]
    pub fn can_download(&self) -> bool {
        !self.launching && !self.running && self.session.is_some()
    }

    /// Live session, or none. A session whose window was closed is dropped here.
    pub fn live_session(&mut self) -> Option<Session> {
        let mut session = self.session.take()?;
        if session.is_alive() {
            Some(session)
        } else {
            logf!("Browser: window is gone, releasing session");
            None
        }
    }

    pub fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                loge!("Worker: thread panicked");
            }
        }
    }

    /// Apply everything the workers sent since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.apply(ev);
        }
    }

    fn apply(&mut self, ev: UiEvent) {
        match ev {
            UiEvent::Log(line) => self.log(line),
            UiEvent::Begin(max) => {
                self.progress_max = max;
                self.progress_done = 0;
            }
            UiEvent::Tick => {
                self.progress_done = (self.progress_done + 1).min(self.progress_max);
            }
            UiEvent::Finish => {}
            UiEvent::Launched(Ok(session)) => {
                self.join_worker();
                self.launching = false;
                self.session = Some(session);
                self.log(" Browser launched. Please log in and navigate to the receipts page.");
            }
            UiEvent::Launched(Err(e)) => {
                self.join_worker();
                self.launching = false;
                loge!("Browser: launch failed: {e}");
                self.log(format!(" ERROR: Could not launch Chrome. {e}"));
            }
            UiEvent::RunDone(session) => {
                self.join_worker();
                self.running = false;
                self.progress_done = 0;
                self.session = Some(session);
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("PLI Downloader & Renamer");
            ui.add_space(6.0);

            components::instructions::draw(ui);
            ui.separator();

            components::date_bar::draw(ui, self);
            ui.separator();

            components::action_buttons::draw(ui, self);
            ui.separator();

            components::log_panel::draw(ui, self);
        });

        ctx.request_repaint_after(Duration::from_millis(LOG_POLL_MS));
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop.raise();
        self.join_worker();
        // a worker that finished during teardown handed its session back
        self.drain_events();
        if let Some(session) = self.session.take() {
            drop(session);
        }
        logf!("Exit: window closed");
    }
}
