// src/params.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::consts::DEFAULT_DOWNLOAD_DIR;
use crate::config::options::BrowserOptions;

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub from: Option<NaiveDate>,       // first premium date to fetch (inclusive)
    pub to: Option<NaiveDate>,         // last premium date to fetch (inclusive)
    pub download_dir: PathBuf,         // where Chrome saves and where we rename
    pub browser: BrowserOptions,       // WebDriver endpoint, login page, driver binary
    pub rename_only: bool,             // skip the browser; rename PDFs already in the dir
}

impl Params {
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            browser: BrowserOptions::default(),
            rename_only: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
