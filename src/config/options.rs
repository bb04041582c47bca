// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::receipts::DateRange;

/// Knobs for `receipts::detect::wait_for_new_file`.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectOptions {
    pub poll_interval: Duration,
    /// Polls spent waiting for any new file to show up.
    pub max_attempts: u32,
    /// Polls spent waiting for a partial download to finish.
    pub settle_attempts: u32,
    pub partial_suffix: String,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            max_attempts: DETECT_ATTEMPTS,
            settle_attempts: SETTLE_ATTEMPTS,
            partial_suffix: s!(PARTIAL_SUFFIX),
        }
    }
}

/// Random pause between two downloads, uniform in `[min_delay, max_delay]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PacingOptions {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for PacingOptions {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs_f64(JITTER_MIN_SECS),
            max_delay: Duration::from_secs_f64(JITTER_MAX_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenameOptions {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            attempts: RENAME_ATTEMPTS,
            backoff: Duration::from_millis(RENAME_BACKOFF_MS),
        }
    }
}

/// Everything one pipeline run needs besides the live collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub download_dir: PathBuf,
    pub range: DateRange,
    pub scan_timeout: Duration,
    pub detect: DetectOptions,
    pub pacing: PacingOptions,
    pub rename: RenameOptions,
}

impl RunOptions {
    pub fn new(range: DateRange) -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            range,
            scan_timeout: Duration::from_secs(SCAN_TIMEOUT_SECS),
            detect: DetectOptions::default(),
            pacing: PacingOptions::default(),
            rename: RenameOptions::default(),
        }
    }
}

/// How to reach (or start) the WebDriver and where downloads land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub login_url: String,
    /// Spawn this chromedriver binary instead of expecting one to be running.
    pub driver_path: Option<PathBuf>,
    pub download_dir: PathBuf,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: s!(WEBDRIVER_URL),
            login_url: s!(LOGIN_URL),
            driver_path: None,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }
}
