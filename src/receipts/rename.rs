// src/receipts/rename.rs
use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
};

use crate::{
    config::options::RenameOptions,
    core::pdf::{PdfText, receipt_text},
    error::Result,
    file::{pdfs_in, resolve_free_path},
    progress::{Progress, say, warn},
};

use super::extract::{ExtractedFields, extract};

/// How one file's rename ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(PathBuf),
    /// Text was readable but one of the three fields was not there.
    MissingFields,
    /// Still inaccessible after every attempt.
    Exhausted,
    Failed(String),
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self, RenameOutcome::Renamed(_))
    }
}

fn canonical_stem(f: &ExtractedFields) -> String {
    format!("{}_{}_{}", f.amount, f.transaction_number, f.formatted_date)
}

/// `{amount}_{transaction_number}_{ddmmyyyy}.pdf`
pub fn canonical_file_name(f: &ExtractedFields) -> String {
    format!("{}.pdf", canonical_stem(f))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads receipt PDFs and moves them to their canonical names.
pub struct Renamer<'a, T: PdfText + ?Sized> {
    text: &'a T,
    opts: RenameOptions,
}

impl<'a, T: PdfText + ?Sized> Renamer<'a, T> {
    pub fn new(text: &'a T, opts: RenameOptions) -> Self {
        Self { text, opts }
    }

    /// Move `path` to its canonical name in the same directory.
    /// An existing different file is never overwritten; a " (N)" suffix is added instead.
    pub fn rename(&self, path: &Path, fields: &ExtractedFields) -> io::Result<PathBuf> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let target = resolve_free_path(dir, &canonical_stem(fields), "pdf", path);
        if target != path {
            fs::rename(path, &target)?;
        }
        Ok(target)
    }

    fn attempt(&self, path: &Path) -> Result<Option<PathBuf>> {
        let bytes = fs::read(path)?;
        let pages = self.text.page_texts(&bytes)?;
        let Some(fields) = extract(&receipt_text(&pages)) else {
            return Ok(None);
        };
        logd!("Rename: {} → {:?}", path.display(), fields);
        Ok(Some(self.rename(path, &fields)?))
    }

    /// Read, extract and rename one file, retrying transient access failures.
    pub fn process(&self, path: &Path, progress: &mut dyn Progress) -> RenameOutcome {
        let attempts = self.opts.attempts.max(1);

        for attempt in 1..=attempts {
            match self.attempt(path) {
                Ok(Some(new_path)) => {
                    say(progress, format!("     Renamed to: {}", display_name(&new_path)));
                    return RenameOutcome::Renamed(new_path);
                }
                Ok(None) => {
                    warn(progress, "     Could not find all required info in PDF. Not renamed.");
                    return RenameOutcome::MissingFields;
                }
                Err(e) if e.is_transient() => {
                    say(progress, format!("    ... file not accessible on attempt {attempt} ({e}), retrying..."));
                    if attempt < attempts {
                        thread::sleep(self.opts.backoff);
                    }
                }
                Err(e) => {
                    warn(progress, format!("     Error reading or renaming file. Error: {e}"));
                    return RenameOutcome::Failed(e.to_string());
                }
            }
        }

        warn(progress, format!(
            "     Failed to access {} after {attempts} attempts.",
            display_name(path)
        ));
        RenameOutcome::Exhausted
    }

    /// `process` each path in order, with a counter line and one tick per file.
    pub fn process_all(&self, paths: &[PathBuf], progress: &mut dyn Progress) -> Vec<RenameOutcome> {
        let total = paths.len();
        paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                say(progress, format!("  ({}/{}) Reading {}...", i + 1, total, display_name(path)));
                let outcome = self.process(path, progress);
                progress.tick();
                outcome
            })
            .collect()
    }

    /// Rename every PDF already sitting in `dir`.
    pub fn rename_directory(&self, dir: &Path, progress: &mut dyn Progress) -> Result<Vec<RenameOutcome>> {
        let paths = pdfs_in(dir)?;
        progress.begin(paths.len());
        say(progress, format!("Found {} PDF file(s) in {}.", paths.len(), dir.display()));
        let outcomes = self.process_all(&paths, progress);
        progress.finish();
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NullProgress, RecordingProgress};

    /// Treats the file bytes as already-extracted UTF-8 text.
    struct PlainText;
    impl PdfText for PlainText {
        fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
            Ok(vec![String::from_utf8_lossy(bytes).into_owned()])
        }
    }

    fn fields() -> ExtractedFields {
        ExtractedFields {
            transaction_number: s!("AB12345678"),
            amount: s!("1500"),
            formatted_date: s!("01022023"),
        }
    }

    fn fast() -> RenameOptions {
        RenameOptions { attempts: 5, backoff: std::time::Duration::ZERO }
    }

    #[test]
    fn canonical_name_layout() {
        assert_eq!(canonical_file_name(&fields()), "1500_AB12345678_01022023.pdf");
    }

    #[test]
    fn rename_moves_within_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("receipt (1).pdf");
        fs::write(&src, b"x").unwrap();

        let r = Renamer::new(&PlainText, fast());
        let out = r.rename(&src, &fields()).unwrap();
        assert_eq!(out, tmp.path().join("1500_AB12345678_01022023.pdf"));
        assert!(!src.exists());
        assert!(out.exists());
    }

    #[test]
    fn already_canonical_is_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("1500_AB12345678_01022023.pdf");
        fs::write(&src, b"x").unwrap();

        let r = Renamer::new(&PlainText, fast());
        assert_eq!(r.rename(&src, &fields()).unwrap(), src);
        assert!(src.exists());
    }

    #[test]
    fn missing_fields_keep_original_name() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("receipt.pdf");
        fs::write(&src, b"AB12345678 but nothing else").unwrap();

        let mut prog = RecordingProgress::default();
        let out = Renamer::new(&PlainText, fast()).process(&src, &mut prog);
        assert_eq!(out, RenameOutcome::MissingFields);
        assert!(src.exists());
        assert!(prog.contains("Not renamed"));
    }

    #[test]
    fn missing_file_is_retried_then_given_up() {
        let tmp = tempfile::tempdir().unwrap();
        let ghost = tmp.path().join("ghost.pdf");

        let mut prog = RecordingProgress::default();
        let out = Renamer::new(&PlainText, fast()).process(&ghost, &mut prog);
        assert_eq!(out, RenameOutcome::Exhausted);
        assert_eq!(prog.lines.iter().filter(|l| l.contains("retrying")).count(), 5);
        assert!(prog.contains("Failed to access ghost.pdf after 5 attempts"));
    }

    #[test]
    fn empty_directory_renames_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let out = Renamer::new(&PlainText, fast())
            .rename_directory(tmp.path(), &mut NullProgress)
            .unwrap();
        assert!(out.is_empty());
    }
}
