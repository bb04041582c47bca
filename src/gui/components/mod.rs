// src/gui/components/mod.rs
pub mod instructions;
pub mod date_bar;
pub mod action_buttons;
pub mod log_panel;
