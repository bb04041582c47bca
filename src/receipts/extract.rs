// src/receipts/extract.rs
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::consts::ROW_DATE_FORMAT;

/// Two letters then at least eight digits, e.g. `AB12345678`.
static TRANSACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z]{2}\d{8,})").unwrap()
});

/// A date immediately followed by a second date; the first one is "paid through".
static PAID_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}/\d{2}/\d{4})\s+\d{2}/\d{2}/\d{4}").unwrap()
});

/// `Total Paid Amount * : ... 1500.00`; only the integer part is kept.
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Total Paid Amount\s*\*?\s*:.*?(\d+)\.\d+").unwrap()
});

/// The three fields a receipt file is named after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedFields {
    pub transaction_number: String,
    /// Integer rupees, no decimals.
    pub amount: String,
    /// `ddmmyyyy`
    pub formatted_date: String,
}

/// Pull all three fields out of receipt text, or nothing at all.
pub fn extract(text: &str) -> Option<ExtractedFields> {
    let transaction_number = TRANSACTION.captures(text)?.get(1)?.as_str();
    let paid = PAID_DATE.captures(text)?.get(1)?.as_str();
    let amount = AMOUNT.captures(text)?.get(1)?.as_str();

    let date = NaiveDate::parse_from_str(paid, ROW_DATE_FORMAT).ok()?;

    Some(ExtractedFields {
        transaction_number: s!(transaction_number),
        amount: s!(amount),
        formatted_date: date.format("%d%m%Y").to_string(),
    })
}
