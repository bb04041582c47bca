// src/gui/progress.rs
use std::sync::mpsc::Sender;

use crate::{
    browser::{SessionGuard, WebDriverSession},
    progress::Progress,
};

pub type Session = SessionGuard<WebDriverSession>;

/// Everything a worker thread tells the UI thread.
pub enum UiEvent {
    Log(String),
    Begin(usize),
    Tick,
    Finish,
    /// Outcome of "Launch Chrome".
    Launched(Result<Session, String>),
    /// A run ended; the session comes back to the window.
    RunDone(Session),
}

/// Progress sink for worker threads: forwards everything over the channel.
pub struct ChannelProgress {
    tx: Sender<UiEvent>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<UiEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, ev: UiEvent) {
        // the window may already be gone during teardown
        let _ = self.tx.send(ev);
    }
}

impl Progress for ChannelProgress {
    fn begin(&mut self, total: usize) {
        self.send(UiEvent::Begin(total));
    }
    fn log(&mut self, msg: &str) {
        self.send(UiEvent::Log(s!(msg)));
    }
    fn tick(&mut self) {
        self.send(UiEvent::Tick);
    }
    fn finish(&mut self) {
        self.send(UiEvent::Finish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn events_arrive_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut p = ChannelProgress::new(tx);
        p.begin(4);
        p.log("Downloading receipt for 123...");
        p.tick();
        p.finish();

        let got: Vec<String> = rx.try_iter().map(|ev| match ev {
            UiEvent::Begin(n) => format!("begin {n}"),
            UiEvent::Log(l) => format!("log {l}"),
            UiEvent::Tick => s!("tick"),
            UiEvent::Finish => s!("finish"),
            UiEvent::Launched(_) | UiEvent::RunDone(_) => s!("session"),
        }).collect();
        assert_eq!(got, vec![
            "begin 4", "log Downloading receipt for 123...", "tick", "finish",
        ]);
    }

    #[test]
    fn closed_window_is_not_an_error() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut p = ChannelProgress::new(tx);
        p.log("nobody listens");
        p.tick();
    }
}
