// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::{LOG_DIR, LOG_FILE};

static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Unit tests log under the system temp dir, not the working tree.
fn log_dir() -> PathBuf {
    if cfg!(test) {
        std::env::temp_dir().join("pli_receipts-test")
    } else {
        PathBuf::from(LOG_DIR)
    }
}

/// Resolve the log path once; creates the log dir on first use.
fn log_path() -> &'static PathBuf {
    LOG_PATH.get_or_init(|| {
        let dir = log_dir();
        let _ = fs::create_dir_all(&dir);
        dir.join(LOG_FILE)
    })
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

fn format_line(elapsed_ms: u128, level: &str, msg: &str) -> String {
    let elapsed = fmt_elapsed(elapsed_ms);
    format!("[{elapsed}][{level}] {msg}\n")
}

/// Internal logging function
pub fn write_log(level: &str, msg: &str) {
    let line = format_line(start().elapsed().as_millis(), level, msg);

    if let Ok(_guard) = LOG_LOCK.lock() {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path())
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn test_builds_keep_the_log_out_of_the_working_tree() {
        write_log("DEBUG", "unit test line");
        let path = log_path();
        assert!(path.starts_with(std::env::temp_dir()), "{}", path.display());
        assert!(!path.starts_with(LOG_DIR));
        assert!(path.exists());
    }

    #[test]
    fn line_carries_level_and_newline() {
        let line = format_line(1_500, "ERROR", "boom");
        assert_eq!(line, "[00:00:01.500][ERROR] boom\n");
    }
}
