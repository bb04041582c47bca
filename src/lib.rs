// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod browser;
pub mod cli;
pub mod params;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod gui;
pub mod progress;
pub mod receipts;
