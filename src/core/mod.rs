// src/core/mod.rs

pub mod pdf;
pub mod sanitize;

pub use pdf::{LopdfText, PdfText};
