// src/browser/mod.rs
//! Browser-session capability used by the receipt pipeline.
//!
//! The pipeline never sees a WebDriver client directly, only this trait,
//! and it owns the session exclusively for a run through `SessionGuard`.
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::error::BrowserError;

pub mod webdriver;

pub use webdriver::WebDriverSession;

pub trait BrowserSession {
    /// A clickable "Download Receipt" action on the live page.
    type Link;

    fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Cell texts of every table row holding a download action.
    /// Waits up to `wait` for the first such row before failing with `Timeout`.
    fn receipt_rows(&mut self, wait: Duration) -> Result<Vec<Vec<String>>, BrowserError>;

    /// All download actions currently on the page, freshly resolved.
    fn download_links(&mut self) -> Result<Vec<Self::Link>, BrowserError>;

    /// Cell texts of the row that owns `link`.
    fn row_cells(&mut self, link: &Self::Link) -> Result<Vec<String>, BrowserError>;

    fn click(&mut self, link: &Self::Link) -> Result<(), BrowserError>;

    fn is_alive(&mut self) -> bool;

    fn close(&mut self) -> Result<(), BrowserError>;
}

/// Exclusive owner of a session; closes it when dropped.
pub struct SessionGuard<S: BrowserSession> {
    session: S,
    closed: bool,
}

impl<S: BrowserSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self { session, closed: false }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close now and report the outcome; dropping afterwards is a no-op.
    pub fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed { return Ok(()); }
        self.closed = true;
        self.session.close()
    }
}

impl<S: BrowserSession> Deref for SessionGuard<S> {
    type Target = S;
    fn deref(&self) -> &S { &self.session }
}

impl<S: BrowserSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S { &mut self.session }
}

impl<S: BrowserSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        match self.close() {
            Ok(()) => logd!("Browser: session released"),
            Err(e) => loge!("Browser: close failed: {e}"),
        }
    }
}
