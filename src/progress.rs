// src/progress.rs
/// Lightweight progress reporting used by the receipt pipeline.
/// Frontends (GUI/CLI) implement this to surface status to users.
/// Calls are fire-and-forget and arrive in order.
pub trait Progress {
    /// Called at the start with the progress-bar maximum.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (a download row or a rename).
    fn tick(&mut self) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Keeps everything it is told; handy for tests and summaries.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub lines: Vec<String>,
    pub ticks: usize,
    pub finished: bool,
}

impl RecordingProgress {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn tick(&mut self) { self.ticks += 1; }
    fn finish(&mut self) { self.finished = true; }
}

/// Send a line to the user and mirror it into the debug log.
pub(crate) fn say(progress: &mut dyn Progress, msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    logf!("{}", msg.trim());
    progress.log(msg);
}

/// Same as `say`, but lands in the debug log as an error.
pub(crate) fn warn(progress: &mut dyn Progress, msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    loge!("{}", msg.trim());
    progress.log(msg);
}
