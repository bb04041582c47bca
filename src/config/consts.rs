// src/config/consts.rs

// Portal / browser
pub const LOGIN_URL: &str = "https://pli.indiapost.gov.in/CustomerPortal/PSLogin.action";
pub const WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DOWNLOAD_LINK_TEXT: &str = "Download Receipt";
pub const SCAN_TIMEOUT_SECS: u64 = 10;
pub const DRIVER_CONNECT_ATTEMPTS: u32 = 20;
pub const DRIVER_CONNECT_PAUSE_MS: u64 = 250;

// Receipt table layout (cell indices within a row)
pub const POLICY_COL: usize = 0;
pub const DATE_COL: usize = 3;
pub const ROW_DATE_FORMAT: &str = "%d/%m/%Y";

// Local files
pub const DEFAULT_DOWNLOAD_DIR: &str = "receipts";
pub const LOG_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Download detection
pub const PARTIAL_SUFFIX: &str = ".crdownload";
pub const POLL_INTERVAL_MS: u64 = 1000;
pub const DETECT_ATTEMPTS: u32 = 20;
pub const SETTLE_ATTEMPTS: u32 = 60;

// Pacing between downloads (be polite)
pub const JITTER_MIN_SECS: f64 = 3.0;
pub const JITTER_MAX_SECS: f64 = 7.0;

// Rename retries
pub const RENAME_ATTEMPTS: u32 = 5;
pub const RENAME_BACKOFF_MS: u64 = 1000;

// GUI
pub const LOG_POLL_MS: u64 = 100;
