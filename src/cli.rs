// src/cli.rs
use std::{error::Error, io::{self, BufRead, Write}, path::PathBuf};

use crate::{
    browser::{BrowserSession, SessionGuard, WebDriverSession},
    config::options::{RenameOptions, RunOptions},
    core::pdf::LopdfText,
    params::Params,
    progress::Progress,
    receipts::{
        DateRange, FsDownloadDir, Renamer, RunOutcome, StopSignal,
        pipeline, rows::parse_row_date,
    },
};

/// Prints every status line; ticks show as a running counter.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn tick(&mut self) {
        self.done += 1;
        if self.total > 0 {
            println!("[{}/{}]", self.done, self.total);
        }
    }
    fn finish(&mut self) {
        let _ = io::stdout().flush();
    }
}

pub fn run(params: Params) -> Result<(), Box<dyn Error>> {
    if params.rename_only {
        return rename_only(&params);
    }

    let from = params.from.ok_or("Missing --from <dd/mm/yyyy>")?;
    let to = params.to.ok_or("Missing --to <dd/mm/yyyy>")?;
    let range = DateRange::checked(from, to)?;

    let mut browser = params.browser.clone();
    browser.download_dir = params.download_dir.clone();

    println!(" Launching controlled Chrome browser...");
    let mut session = SessionGuard::new(WebDriverSession::launch(&browser)?);
    println!(" Browser launched. Log in, open the list of receipts, then press Enter here.");
    wait_for_enter()?;

    if !session.is_alive() {
        return Err("The browser is not running anymore.".into());
    }

    let dir = FsDownloadDir::open(&params.download_dir)?;
    let mut opts = RunOptions::new(range);
    opts.download_dir = params.download_dir.clone();

    let mut progress = ConsoleProgress::default();
    let outcome = pipeline::run(
        &mut *session,
        &dir,
        &LopdfText,
        &opts,
        &mut progress,
        &StopSignal::new(),
    )?;

    if let RunOutcome::Completed(summary) = outcome {
        for path in &summary.unrenamed {
            println!("  not renamed: {}", path.display());
        }
    }
    session.close()?;
    Ok(())
}

fn rename_only(params: &Params) -> Result<(), Box<dyn Error>> {
    let renamer = Renamer::new(&LopdfText, RenameOptions::default());
    let mut progress = ConsoleProgress::default();
    let outcomes = renamer.rename_directory(&params.download_dir, &mut progress)?;
    let renamed = outcomes.iter().filter(|o| o.is_renamed()).count();
    println!(" Renamed {renamed} of {} file(s).", outcomes.len());
    Ok(())
}

fn wait_for_enter() -> io::Result<()> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Params, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::new();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--from" => {
                let v = args.next().ok_or("Missing value for --from")?;
                params.from = Some(parse_row_date(&v)?);}
            "--to" => {
                let v = args.next().ok_or("Missing value for --to")?;
                params.to = Some(parse_row_date(&v)?);}
            "-d" | "--dir" => params.download_dir = PathBuf::from(args.next().ok_or("Missing download directory")?),
            "--webdriver" => params.browser.webdriver_url = args.next().ok_or("Missing value for --webdriver")?,
            "--driver" => params.browser.driver_path = Some(PathBuf::from(args.next().ok_or("Missing chromedriver path")?)),
            "--url" => params.browser.login_url = args.next().ok_or("Missing value for --url")?,
            "--rename-only" => params.rename_only = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if !params.rename_only {
        if let (Some(from), Some(to)) = (params.from, params.to) {
            DateRange::checked(from, to)?;
        }
    }
    params.browser.download_dir = params.download_dir.clone();
    Ok(params)
}
