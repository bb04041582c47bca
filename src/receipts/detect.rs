// src/receipts/detect.rs
use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::SystemTime,
};

use crate::config::options::DetectOptions;

/// The folder the browser downloads into, seen as a set of file names.
pub trait DownloadDir {
    fn list(&self) -> io::Result<BTreeSet<String>>;

    fn path_of(&self, name: &str) -> PathBuf;

    /// Last modification time, when the backing store knows it.
    fn modified(&self, _name: &str) -> Option<SystemTime> {
        None
    }
}

/// A real directory on disk.
#[derive(Clone, Debug)]
pub struct FsDownloadDir {
    root: PathBuf,
}

impl FsDownloadDir {
    /// Open `root`, creating it when missing.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DownloadDir for FsDownloadDir {
    fn list(&self) -> io::Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() { continue; }
            if let Ok(name) = entry.file_name().into_string() {
                names.insert(name);
            }
        }
        Ok(names)
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn modified(&self, name: &str) -> Option<SystemTime> {
        fs::metadata(self.path_of(name)).ok()?.modified().ok()
    }
}

pub fn is_partial(name: &str, suffix: &str) -> bool {
    !suffix.is_empty() && name.ends_with(suffix)
}

fn new_names(dir: &dyn DownloadDir, before: &BTreeSet<String>) -> io::Result<BTreeSet<String>> {
    let now = dir.list()?;
    Ok(now.difference(before).cloned().collect())
}

/// Finished files win; among several, the newest, then the first by name.
fn pick_candidate(dir: &dyn DownloadDir, fresh: &BTreeSet<String>, suffix: &str) -> Option<String> {
    fresh
        .iter()
        .filter(|n| !is_partial(n, suffix))
        .max_by(|a, b| {
            dir.modified(a)
                .cmp(&dir.modified(b))
                .then_with(|| b.cmp(a))
        })
        .cloned()
}

/// Poll `dir` until a file that was not in `before` shows up and is complete.
///
/// Polls every `poll_interval`, at most `max_attempts` times, for anything new.
/// Once something appears, waits up to `settle_attempts` more polls for a
/// non-partial name. Gives up (`None`) when the new files vanish or the budget
/// runs out. Never returns a name ending in `partial_suffix`.
pub fn wait_for_new_file(
    dir: &dyn DownloadDir,
    before: &BTreeSet<String>,
    opts: &DetectOptions,
) -> Option<PathBuf> {
    for attempt in 1..=opts.max_attempts {
        thread::sleep(opts.poll_interval);

        let fresh = match new_names(dir, before) {
            Ok(f) => f,
            Err(e) => {
                loge!("Detect: listing failed on poll {attempt}: {e}");
                continue;
            }
        };
        if fresh.is_empty() { continue; }

        logd!("Detect: poll {attempt} sees {:?}", fresh);
        return settle(dir, before, fresh, opts);
    }
    logd!("Detect: nothing new after {} polls", opts.max_attempts);
    None
}

fn settle(
    dir: &dyn DownloadDir,
    before: &BTreeSet<String>,
    mut fresh: BTreeSet<String>,
    opts: &DetectOptions,
) -> Option<PathBuf> {
    let mut polls = 0;
    loop {
        if let Some(name) = pick_candidate(dir, &fresh, &opts.partial_suffix) {
            if fresh.len() > 1 {
                logd!("Detect: {} new files, picked {name}", fresh.len());
            }
            return Some(dir.path_of(&name));
        }
        if polls >= opts.settle_attempts {
            loge!("Detect: download still partial after {polls} polls: {:?}", fresh);
            return None;
        }
        polls += 1;
        thread::sleep(opts.poll_interval);

        fresh = match new_names(dir, before) {
            Ok(f) => f,
            Err(e) => {
                loge!("Detect: listing failed while settling: {e}");
                continue;
            }
        };
        if fresh.is_empty() {
            logd!("Detect: partial download disappeared without a final file");
            return None;
        }
    }
}
