// src/error.rs
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Could not start browser: {0}")]
    Launch(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("Browser session is closed")]
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl ReceiptError {
    /// File-access failures worth another attempt (file not flushed yet, locked by the browser).
    pub fn is_transient(&self) -> bool {
        match self {
            ReceiptError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::NotFound
                    | io::ErrorKind::PermissionDenied
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
                    | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
