// src/config/state.rs
use chrono::NaiveDate;

use super::options::BrowserOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Inclusive range picked in the date bar
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub window_w: u32,
    pub window_h: u32,
}

impl GuiState {
    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            end_date: today,
            window_w: 600,
            window_h: 650,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub browser: BrowserOptions,
    pub gui: GuiState,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            browser: BrowserOptions::default(),
            gui: GuiState::starting_on(today),
        }
    }
}
