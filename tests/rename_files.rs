// tests/rename_files.rs
//
// Renaming downloaded receipts on disk, including flaky file access.
//
use std::{cell::Cell, fs, io, time::Duration};

use pli_receipts::{
    config::options::RenameOptions,
    core::pdf::PdfText,
    error::{ReceiptError, Result},
    progress::RecordingProgress,
    receipts::{RenameOutcome, Renamer},
};

const BODY: &str = "Receipt No AB12345678\nPolicy MH-1\n05/01/2023\n05/02/2023\n\
                    Total Paid Amount * :\nRs.\n1500.00\n";

/// File bytes are the receipt text.
struct PlainText;
impl PdfText for PlainText {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        Ok(vec![String::from_utf8_lossy(bytes).into_owned()])
    }
}

/// Locked for the first `fail_for` reads, then behaves like `PlainText`.
struct LockedFor {
    fail_for: u32,
    calls: Cell<u32>,
}
impl PdfText for LockedFor {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n <= self.fail_for {
            return Err(ReceiptError::Io(io::Error::from(io::ErrorKind::PermissionDenied)));
        }
        PlainText.page_texts(bytes)
    }
}

/// Parses, but the document is corrupt.
struct Corrupt;
impl PdfText for Corrupt {
    fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        Err(ReceiptError::Pdf("bad xref".into()))
    }
}

fn fast(attempts: u32) -> RenameOptions {
    RenameOptions { attempts, backoff: Duration::ZERO }
}

#[test]
fn receipt_gets_canonical_name() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("Receipt (3).pdf");
    fs::write(&src, BODY).unwrap();

    let mut prog = RecordingProgress::default();
    let out = Renamer::new(&PlainText, fast(5)).process(&src, &mut prog);

    let expected = tmp.path().join("1500_AB12345678_05012023.pdf");
    assert_eq!(out, RenameOutcome::Renamed(expected.clone()));
    assert!(expected.exists());
    assert!(!src.exists());
    assert!(prog.contains("Renamed to: 1500_AB12345678_05012023.pdf"));
}

#[test]
fn collision_gets_numbered_suffix() {
    let tmp = tempfile::tempdir().unwrap();
    let taken = tmp.path().join("1500_AB12345678_05012023.pdf");
    fs::write(&taken, b"someone else").unwrap();
    let src = tmp.path().join("download.pdf");
    fs::write(&src, BODY).unwrap();

    let out = Renamer::new(&PlainText, fast(5)).process(&src, &mut RecordingProgress::default());

    assert_eq!(out, RenameOutcome::Renamed(tmp.path().join("1500_AB12345678_05012023 (2).pdf")));
    assert_eq!(fs::read(&taken).unwrap(), b"someone else");
}

#[test]
fn locked_file_recovers_within_budget() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("download.pdf");
    fs::write(&src, BODY).unwrap();

    let text = LockedFor { fail_for: 2, calls: Cell::new(0) };
    let mut prog = RecordingProgress::default();
    let out = Renamer::new(&text, fast(5)).process(&src, &mut prog);

    assert!(out.is_renamed());
    assert_eq!(text.calls.get(), 3);
    assert_eq!(prog.lines.iter().filter(|l| l.contains("retrying")).count(), 2);
}

#[test]
fn locked_file_is_kept_after_exhausting_attempts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("download.pdf");
    fs::write(&src, BODY).unwrap();

    let text = LockedFor { fail_for: 5, calls: Cell::new(0) };
    let mut prog = RecordingProgress::default();
    let out = Renamer::new(&text, fast(5)).process(&src, &mut prog);

    assert_eq!(out, RenameOutcome::Exhausted);
    assert_eq!(text.calls.get(), 5);
    assert!(src.exists());
    assert!(prog.contains("Failed to access download.pdf after 5 attempts."));
}

#[test]
fn corrupt_pdf_fails_without_retry() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("download.pdf");
    fs::write(&src, b"%PDF-broken").unwrap();

    let mut prog = RecordingProgress::default();
    let out = Renamer::new(&Corrupt, fast(5)).process(&src, &mut prog);

    assert!(matches!(out, RenameOutcome::Failed(_)));
    assert!(src.exists());
    assert!(!prog.contains("retrying"));
    assert!(prog.contains("Error reading or renaming file"));
}

#[test]
fn whole_directory_is_processed_in_name_order() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("b.pdf"), BODY.replace("AB12345678", "CD87654321")).unwrap();
    fs::write(tmp.path().join("a.PDF"), BODY).unwrap();
    fs::write(tmp.path().join("c.pdf"), "no fields at all").unwrap();
    fs::write(tmp.path().join("notes.txt"), BODY).unwrap();

    let mut prog = RecordingProgress::default();
    let outcomes = Renamer::new(&PlainText, fast(1))
        .rename_directory(tmp.path(), &mut prog)
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], RenameOutcome::Renamed(tmp.path().join("1500_AB12345678_05012023.pdf")));
    assert_eq!(outcomes[1], RenameOutcome::Renamed(tmp.path().join("1500_CD87654321_05012023.pdf")));
    assert_eq!(outcomes[2], RenameOutcome::MissingFields);
    assert_eq!(prog.total, Some(3));
    assert_eq!(prog.ticks, 3);
    assert!(prog.finished);
    assert!(tmp.path().join("notes.txt").exists());
}
