// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create `dir` (and parents) unless it is already a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// First free name for `<stem>.<ext>` in `dir`.
///
/// First choice: "<stem>.ext"
/// Taken:        "<stem> (N).ext" with N starting at 2
/// A path equal to `own` counts as free (renaming a file onto itself).
pub fn resolve_free_path(dir: &Path, stem: &str, ext: &str, own: &Path) -> PathBuf {
    let mut n = 1usize;
    loop {
        let filename = if n == 1 {
            format!("{stem}.{ext}")
        } else {
            format!("{stem} ({n}).{ext}")
        };
        let candidate = dir.join(filename);
        if candidate == own || !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Every `*.pdf` file directly inside `dir`, by name.
pub fn pdfs_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() { continue; }
        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf { out.push(path); }
    }
    out.sort();
    Ok(out)
}
