// src/gui/mod.rs
pub mod app;
pub mod progress;
pub mod components;
pub mod actions;

pub use app::run;
