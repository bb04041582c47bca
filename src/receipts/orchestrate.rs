// src/receipts/orchestrate.rs
use std::{path::PathBuf, thread, time::Duration};

use rand::Rng;

use crate::{
    browser::BrowserSession,
    config::options::{DetectOptions, PacingOptions},
    error::{BrowserError, Result},
    progress::{Progress, say, warn},
};

use super::{
    detect::{DownloadDir, wait_for_new_file},
    pipeline::StopSignal,
    rows::ReceiptRow,
};

/// A receipt that made it to disk, still under the browser's file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadResult {
    pub row: ReceiptRow,
    pub path: PathBuf,
}

enum Step {
    Downloaded(PathBuf),
    TimedOut,
    LinkMissing,
}

/// Pause length for one gap between downloads.
pub fn jitter(pacing: &PacingOptions, rng: &mut impl Rng) -> Duration {
    let lo = pacing.min_delay.as_secs_f64();
    let hi = pacing.max_delay.as_secs_f64();
    if hi <= lo {
        return pacing.min_delay;
    }
    Duration::from_secs_f64(rng.gen_range(lo..=hi))
}

/// Download `rows` one at a time, in order.
///
/// Each row is looked up again on the live page (earlier clicks may have
/// re-rendered the table), clicked, and its file awaited. Failures stay local
/// to the row. One `tick` per row, whatever happened to it.
pub fn download_all<S: BrowserSession>(
    session: &mut S,
    dir: &dyn DownloadDir,
    rows: &[ReceiptRow],
    detect: &DetectOptions,
    pacing: &PacingOptions,
    progress: &mut dyn Progress,
    stop: &StopSignal,
) -> Vec<DownloadResult> {
    let total = rows.len();
    let mut results = Vec::with_capacity(total);
    let mut rng = rand::thread_rng();

    for (i, row) in rows.iter().enumerate() {
        if stop.is_raised() {
            warn(progress, format!("  Stopped before {} of {} receipts.", i + 1, total));
            break;
        }

        say(progress, format!(
            "  ({}/{}) Downloading receipt for {} ({})...",
            i + 1, total, row.policy_id, row.premium_date
        ));

        let step = download_one(session, dir, row, detect);
        let clicked = !matches!(step, Ok(Step::LinkMissing));

        match step {
            Ok(Step::Downloaded(path)) => {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                say(progress, format!("     Downloaded as: {name}"));
                results.push(DownloadResult { row: row.clone(), path });
            }
            Ok(Step::TimedOut) => {
                warn(progress, "     Timed out waiting for file to download.");
            }
            Ok(Step::LinkMissing) => {
                warn(progress, format!("     Could not re-find link for {}. Skipping.", row.policy_id));
            }
            Err(e) => {
                warn(progress, format!("     Failed to process this receipt. Error: {e}"));
            }
        }
        progress.tick();

        if clicked && i + 1 < total {
            let delay = jitter(pacing, &mut rng);
            say(progress, format!("    ... waiting for {:.1} seconds.", delay.as_secs_f64()));
            thread::sleep(delay);
        }
    }

    results
}

fn download_one<S: BrowserSession>(
    session: &mut S,
    dir: &dyn DownloadDir,
    row: &ReceiptRow,
    detect: &DetectOptions,
) -> Result<Step> {
    let Some(link) = find_link(session, row)? else {
        return Ok(Step::LinkMissing);
    };

    let before = dir.list()?;
    session.click(&link)?;

    Ok(match wait_for_new_file(dir, &before, detect) {
        Some(path) => Step::Downloaded(path),
        None => Step::TimedOut,
    })
}

/// Re-resolve the download action for `row` against the current page.
fn find_link<S: BrowserSession>(session: &mut S, row: &ReceiptRow) -> std::result::Result<Option<S::Link>, BrowserError> {
    let record = row.record();
    for link in session.download_links()? {
        match session.row_cells(&link) {
            Ok(cells) if record.matches_cells(&cells) => return Ok(Some(link)),
            Ok(_) => {}
            // stale element; the rest of the page may still be fine
            Err(e) => logd!("Orchestrate: skipping unreadable row: {e}"),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn jitter_stays_inside_bounds() {
        let pacing = PacingOptions::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = jitter(&pacing, &mut rng);
            assert!(d >= Duration::from_secs(3) && d <= Duration::from_secs(7), "{d:?}");
        }
    }

    #[test]
    fn jitter_with_empty_window_is_min() {
        let pacing = PacingOptions { min_delay: Duration::ZERO, max_delay: Duration::ZERO };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(jitter(&pacing, &mut rng), Duration::ZERO);
    }
}
