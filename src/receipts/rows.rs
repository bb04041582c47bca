// src/receipts/rows.rs
use chrono::NaiveDate;

use crate::config::consts::{DATE_COL, POLICY_COL, ROW_DATE_FORMAT};
use crate::error::{ReceiptError, Result};

/// One row as read off the page, before any date parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowRecord {
    pub policy_id: String,
    pub date_text: String,
}

impl RowRecord {
    pub fn new(policy_id: impl Into<String>, date_text: impl Into<String>) -> Self {
        Self { policy_id: policy_id.into(), date_text: date_text.into() }
    }

    /// Build from the cell texts of a table row; short rows are not receipts.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        let policy = cells.get(POLICY_COL)?;
        let date = cells.get(DATE_COL)?;
        Some(Self::new(policy.trim(), date.trim()))
    }

    /// True when a live row's cells belong to this record.
    pub fn matches_cells(&self, cells: &[String]) -> bool {
        let policy = cells.get(POLICY_COL).map(|s| s.trim());
        let date = cells.get(DATE_COL).map(|s| s.trim());
        policy == Some(self.policy_id.as_str()) && date == Some(self.date_text.as_str())
    }
}

/// A receipt selected for download. `premium_date` is the text as shown on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceiptRow {
    pub policy_id: String,
    pub premium_date: String,
    pub parsed_date: NaiveDate,
}

impl ReceiptRow {
    pub fn record(&self) -> RowRecord {
        RowRecord::new(self.policy_id.clone(), self.premium_date.clone())
    }
}

/// Inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Like `new`, but refuses a range that ends before it starts.
    pub fn checked(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReceiptError::InvalidRange(format!(
                "{} is after {}",
                start.format(ROW_DATE_FORMAT),
                end.format(ROW_DATE_FORMAT)
            )));
        }
        Ok(Self::new(start, end))
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Parse a `dd/mm/yyyy` cell. Surrounding whitespace is ignored.
pub fn parse_row_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ROW_DATE_FORMAT)
        .map_err(|e| ReceiptError::InvalidDate(format!("{text:?}: {e}")))
}

/// Keep rows dated inside `range`, oldest first.
/// Unparseable dates are dropped; equal dates keep page order.
pub fn filter_and_sort(rows: &[RowRecord], range: &DateRange) -> Vec<ReceiptRow> {
    let mut out: Vec<ReceiptRow> = rows
        .iter()
        .filter_map(|r| {
            let day = parse_row_date(&r.date_text).ok()?;
            range.contains(day).then(|| ReceiptRow {
                policy_id: r.policy_id.clone(),
                premium_date: r.date_text.clone(),
                parsed_date: day,
            })
        })
        .collect();

    // stable
    out.sort_by_key(|r| r.parsed_date);
    out
}
