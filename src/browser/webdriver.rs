// src/browser/webdriver.rs
//! Chrome over WebDriver (`fantoccini`).
//!
//! The pipeline is synchronous and runs on its own worker thread, so the
//! session owns a current-thread tokio runtime and blocks on each command.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    time::Duration,
};

use fantoccini::{Client, ClientBuilder, Locator, elements::Element, error::CmdError};
use serde_json::{Map, Value, json};
use tokio::runtime::{Builder, Runtime};

use crate::{
    config::{
        consts::{DOWNLOAD_LINK_TEXT, DRIVER_CONNECT_ATTEMPTS, DRIVER_CONNECT_PAUSE_MS},
        options::BrowserOptions,
    },
    core::sanitize::normalize_ws,
    error::BrowserError,
    file::ensure_directory,
};

use super::BrowserSession;

pub struct WebDriverSession {
    rt: Runtime,
    client: Option<Client>,
    /// chromedriver we started ourselves, if any
    driver: Option<Child>,
}

fn wd(e: CmdError) -> BrowserError {
    BrowserError::WebDriver(e.to_string())
}

/// XPath for table rows that hold a download action.
pub fn receipt_row_xpath() -> String {
    format!("//a[text()='{DOWNLOAD_LINK_TEXT}']/ancestor::tr")
}

/// Chrome preferences: download silently into `download_dir`, never open PDFs inline.
pub fn chrome_capabilities(download_dir: &Path) -> Map<String, Value> {
    let prefs = json!({
        "download.default_directory": download_dir.to_string_lossy(),
        "download.prompt_for_download": false,
        "download.directory_upgrade": true,
        "plugins.always_open_pdf_externally": true,
    });

    let mut caps = Map::new();
    caps.insert(s!("goog:chromeOptions"), json!({ "prefs": prefs }));
    caps
}

/// Port from a URL like `http://localhost:9515/`.
fn port_of(url: &str) -> Option<u16> {
    url.trim_end_matches('/').rsplit(':').next()?.parse().ok()
}

fn spawn_driver(path: &Path, webdriver_url: &str) -> Result<Child, BrowserError> {
    let port = port_of(webdriver_url)
        .ok_or_else(|| BrowserError::Launch(format!("no port in WebDriver URL {webdriver_url}")))?;

    logf!("Browser: spawning {} on port {port}", path.display());
    Command::new(path)
        .arg(format!("--port={port}"))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BrowserError::Launch(format!("{}: {e}", path.display())))
}

async fn connect(url: &str, caps: Map<String, Value>, attempts: u32) -> Result<Client, BrowserError> {
    let mut last = s!();
    for attempt in 1..=attempts.max(1) {
        match ClientBuilder::native().capabilities(caps.clone()).connect(url).await {
            Ok(client) => return Ok(client),
            Err(e) => {
                logd!("Browser: connect attempt {attempt} failed: {e}");
                last = e.to_string();
                tokio::time::sleep(Duration::from_millis(DRIVER_CONNECT_PAUSE_MS)).await;
            }
        }
    }
    Err(BrowserError::Launch(format!("cannot reach WebDriver at {url}: {last}")))
}

async fn cell_texts(row: &Element) -> Result<Vec<String>, BrowserError> {
    let cells = row.find_all(Locator::Css("td")).await.map_err(wd)?;
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        out.push(normalize_ws(&cell.text().await.map_err(wd)?));
    }
    Ok(out)
}

impl WebDriverSession {
    /// Start Chrome with downloads routed to `opts.download_dir` and open the login page.
    pub fn launch(opts: &BrowserOptions) -> Result<Self, BrowserError> {
        let download_dir = absolute_dir(&opts.download_dir)?;

        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let mut driver = match &opts.driver_path {
            Some(path) => Some(spawn_driver(path, &opts.webdriver_url)?),
            None => None,
        };
        // a freshly spawned driver needs a moment before it accepts sessions
        let attempts = if driver.is_some() { DRIVER_CONNECT_ATTEMPTS } else { 1 };

        let caps = chrome_capabilities(&download_dir);
        let client = match rt.block_on(connect(&opts.webdriver_url, caps, attempts)) {
            Ok(c) => c,
            Err(e) => {
                if let Some(mut child) = driver.take() {
                    let _ = child.kill();
                    let _ = child.wait();
                }
                return Err(e);
            }
        };

        let mut session = Self { rt, client: Some(client), driver };
        session.navigate(&opts.login_url)?;
        logf!("Browser: launched, downloads → {}", download_dir.display());
        Ok(session)
    }

    fn client(&self) -> Result<&Client, BrowserError> {
        self.client.as_ref().ok_or(BrowserError::Closed)
    }

    fn stop_driver(&mut self) {
        if let Some(mut child) = self.driver.take() {
            if let Err(e) = child.kill() {
                loge!("Browser: could not stop chromedriver: {e}");
            }
            let _ = child.wait();
        }
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, BrowserError> {
    ensure_directory(dir).map_err(|e| BrowserError::Launch(format!("{}: {e}", dir.display())))?;
    fs::canonicalize(dir).map_err(|e| BrowserError::Launch(format!("{}: {e}", dir.display())))
}

impl BrowserSession for WebDriverSession {
    type Link = Element;

    fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let client = self.client()?;
        self.rt.block_on(client.goto(url)).map_err(wd)
    }

    fn receipt_rows(&mut self, wait: Duration) -> Result<Vec<Vec<String>>, BrowserError> {
        let client = self.client()?;
        let xpath = receipt_row_xpath();

        self.rt.block_on(async {
            match client.wait().at_most(wait).for_element(Locator::XPath(&xpath)).await {
                Ok(_) => {}
                Err(CmdError::WaitTimeout) => {
                    return Err(BrowserError::Timeout(s!("receipt rows")));
                }
                Err(e) => return Err(wd(e)),
            }

            let rows = client.find_all(Locator::XPath(&xpath)).await.map_err(wd)?;
            let mut out = Vec::with_capacity(rows.len());
            for row in &rows {
                out.push(cell_texts(row).await?);
            }
            Ok(out)
        })
    }

    fn download_links(&mut self) -> Result<Vec<Element>, BrowserError> {
        let client = self.client()?;
        self.rt
            .block_on(client.find_all(Locator::LinkText(DOWNLOAD_LINK_TEXT)))
            .map_err(wd)
    }

    fn row_cells(&mut self, link: &Element) -> Result<Vec<String>, BrowserError> {
        self.client()?;
        self.rt.block_on(async {
            let row = link.find(Locator::XPath("./ancestor::tr")).await.map_err(wd)?;
            cell_texts(&row).await
        })
    }

    fn click(&mut self, link: &Element) -> Result<(), BrowserError> {
        self.client()?;
        self.rt
            .block_on(link.clone().click())
            .map(|_| ())
            .map_err(wd)
    }

    fn is_alive(&mut self) -> bool {
        match self.client() {
            Ok(client) => self.rt.block_on(client.title()).is_ok(),
            Err(_) => false,
        }
    }

    fn close(&mut self) -> Result<(), BrowserError> {
        let result = match self.client.take() {
            Some(client) => self.rt.block_on(client.close()).map_err(wd),
            None => Ok(()),
        };
        self.stop_driver();
        result
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        self.stop_driver();
    }
}
