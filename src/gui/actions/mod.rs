// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{launch,download,reset}.

mod launch;    // src/gui/actions/launch.rs
mod download;  // src/gui/actions/download.rs
mod reset;     // src/gui/actions/reset.rs

pub use launch::launch;
pub use download::download;
pub use reset::reset;
