//! Cell parsers.
//!
//! Each parser takes a trimmed, non-empty cell and returns `None` when the
//! text cannot be read as the expected type.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// The cell's text with surrounding whitespace removed, or `None` when the
/// cell is absent or blank.
pub fn present(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|s| !s.is_empty())
}

/// A non-negative decimal amount. Thousands separators are ignored, so
/// `"1,250.50"` reads as `1250.50`.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    let amount = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;
    if amount < Decimal::ZERO {
        return None;
    }
    Some(amount)
}

/// A timestamp. RFC 3339 values with an offset are converted to UTC; a
/// bare date reads as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_plain_date(raw).map(|d| d.and_time(NaiveTime::MIN)))
}

/// A calendar date. Timestamps are accepted too; their date part is used.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_plain_date(raw).or_else(|| parse_timestamp(raw).map(|t| t.date()))
}

fn parse_plain_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
