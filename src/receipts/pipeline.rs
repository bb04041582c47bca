// src/receipts/pipeline.rs
use std::{
    path::PathBuf,
    sync::{Arc, atomic::{AtomicBool, Ordering}},
};

use crate::{
    browser::BrowserSession,
    config::options::RunOptions,
    core::pdf::PdfText,
    error::Result,
    progress::{Progress, say, warn},
};

use super::{
    detect::DownloadDir,
    orchestrate::download_all,
    rename::{RenameOutcome, Renamer},
    rows::{RowRecord, filter_and_sort},
};

/// Raised on window teardown; checked between items, never mid-item.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows inside the date range.
    pub planned: usize,
    pub downloaded: usize,
    pub renamed: usize,
    /// Downloaded files still under their browser-given name.
    pub unrenamed: Vec<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page had no receipt rows at all.
    NoRows,
    /// Rows exist, none dated inside the range.
    NoRowsInRange,
    Completed(RunSummary),
}

/// One end-to-end run: scan → filter/sort → download → rename → summary.
///
/// Only the initial scan can fail the run; everything after it is handled per
/// receipt. `progress.finish()` is always called.
pub fn run<S, T>(
    session: &mut S,
    dir: &dyn DownloadDir,
    text: &T,
    opts: &RunOptions,
    progress: &mut dyn Progress,
    stop: &StopSignal,
) -> Result<RunOutcome>
where
    S: BrowserSession,
    T: PdfText + ?Sized,
{
    logf!(
        "Run: begin range={}..={} dir={}",
        opts.range.start, opts.range.end, opts.download_dir.display()
    );
    let outcome = run_inner(session, dir, text, opts, progress, stop);

    match &outcome {
        Ok(o) => logf!("Run: end {:?}", o),
        Err(e) => warn(progress, format!(" An error occurred: {e}")),
    }
    progress.finish();
    outcome
}

fn run_inner<S, T>(
    session: &mut S,
    dir: &dyn DownloadDir,
    text: &T,
    opts: &RunOptions,
    progress: &mut dyn Progress,
    stop: &StopSignal,
) -> Result<RunOutcome>
where
    S: BrowserSession,
    T: PdfText + ?Sized,
{
    say(progress, " Scanning page for receipts...");
    let table = session.receipt_rows(opts.scan_timeout)?;

    if table.is_empty() {
        say(progress, " No receipt rows found on the current page.");
        return Ok(RunOutcome::NoRows);
    }

    let records: Vec<RowRecord> = table
        .iter()
        .filter_map(|cells| RowRecord::from_cells(cells))
        .collect();
    say(progress, format!("Found {} total receipts. Filtering and sorting...", records.len()));

    let rows = filter_and_sort(&records, &opts.range);
    if rows.is_empty() {
        say(progress, " No receipts match the selected date range.");
        return Ok(RunOutcome::NoRowsInRange);
    }

    let planned = rows.len();
    say(progress, format!("Found {planned} receipts to process in the specified range."));
    progress.begin(planned * 2);

    let downloads = download_all(session, dir, &rows, &opts.detect, &opts.pacing, progress, stop);

    let mut summary = RunSummary {
        planned,
        downloaded: downloads.len(),
        ..RunSummary::default()
    };

    if stop.is_raised() {
        warn(progress, " Stopped; downloaded files keep their original names.");
        summary.unrenamed = downloads.into_iter().map(|d| d.path).collect();
        return Ok(RunOutcome::Completed(summary));
    }

    say(progress, " Starting renaming process...");
    let paths: Vec<PathBuf> = downloads.into_iter().map(|d| d.path).collect();
    let renamer = Renamer::new(text, opts.rename.clone());
    let outcomes = renamer.process_all(&paths, progress);

    for (path, outcome) in paths.into_iter().zip(outcomes) {
        match outcome {
            RenameOutcome::Renamed(_) => summary.renamed += 1,
            _ => summary.unrenamed.push(path),
        }
    }

    say(progress, format!(
        " Process complete. Downloaded {} of {}; renamed {}.",
        summary.downloaded, summary.planned, summary.renamed
    ));
    Ok(RunOutcome::Completed(summary))
}
