// src/receipts/mod.rs
//! # Receipt pipeline
//!
//! Everything between "the operator is looking at the receipt table" and
//! "the PDFs on disk carry canonical names":
//!
//! ```text
//! pipeline::run → browser rows → rows::filter_and_sort
//!              → orchestrate::download_all (click + detect::wait_for_new_file)
//!              → rename::Renamer::process (core::pdf text → extract::extract)
//! ```
//!
//! The browser, the directory and the PDF text source are reached only through
//! narrow traits (`BrowserSession`, `detect::DownloadDir`, `core::pdf::PdfText`)
//! so each stage runs offline in tests.
pub mod rows;
pub mod detect;
pub mod orchestrate;
pub mod extract;
pub mod rename;
pub mod pipeline;

pub use rows::{DateRange, ReceiptRow, RowRecord, filter_and_sort};
pub use detect::{DownloadDir, FsDownloadDir, wait_for_new_file};
pub use orchestrate::{DownloadResult, download_all};
pub use extract::{ExtractedFields, extract};
pub use rename::{RenameOutcome, Renamer, canonical_file_name};
pub use pipeline::{RunOutcome, RunSummary, StopSignal};
