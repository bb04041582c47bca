// tests/detect_downloads.rs
//
// Download detection against a real directory that another thread writes into.
//
use std::{collections::BTreeSet, fs, thread, time::Duration};

use pli_receipts::{
    config::options::DetectOptions,
    receipts::{DownloadDir, FsDownloadDir, wait_for_new_file},
};

fn opts(max_attempts: u32, settle_attempts: u32) -> DetectOptions {
    DetectOptions {
        poll_interval: Duration::from_millis(20),
        max_attempts,
        settle_attempts,
        partial_suffix: ".crdownload".into(),
    }
}

#[test]
fn partial_then_final_file_is_reported_once_finished() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = FsDownloadDir::open(tmp.path()).unwrap();
    fs::write(tmp.path().join("old.pdf"), b"old").unwrap();
    let before = dir.list().unwrap();

    let root = tmp.path().to_path_buf();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        let partial = root.join("receipt.pdf.crdownload");
        fs::write(&partial, b"half").unwrap();
        thread::sleep(Duration::from_millis(120));
        fs::rename(&partial, root.join("receipt.pdf")).unwrap();
    });

    let found = wait_for_new_file(&dir, &before, &opts(50, 50));
    writer.join().unwrap();

    assert_eq!(found, Some(tmp.path().join("receipt.pdf")));
}

#[test]
fn nothing_new_gives_up() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = FsDownloadDir::open(tmp.path()).unwrap();
    fs::write(tmp.path().join("already.pdf"), b"x").unwrap();
    let before = dir.list().unwrap();

    assert_eq!(wait_for_new_file(&dir, &before, &opts(3, 3)), None);
}

#[test]
fn stuck_partial_is_never_returned() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = FsDownloadDir::open(tmp.path()).unwrap();
    let before = BTreeSet::new();
    fs::write(tmp.path().join("slow.pdf.crdownload"), b"...").unwrap();

    assert_eq!(wait_for_new_file(&dir, &before, &opts(3, 2)), None);
}

#[test]
fn subdirectories_are_not_downloads() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = FsDownloadDir::open(tmp.path()).unwrap();
    let before = dir.list().unwrap();
    fs::create_dir(tmp.path().join("nested")).unwrap();

    assert!(dir.list().unwrap().is_empty());
    assert_eq!(wait_for_new_file(&dir, &before, &opts(2, 2)), None);
}

#[test]
fn open_creates_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("a").join("receipts");
    let dir = FsDownloadDir::open(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(dir.root(), root.as_path());
    assert_eq!(dir.path_of("x.pdf"), root.join("x.pdf"));
}
