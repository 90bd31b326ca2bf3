//! Date normalization to ISO `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate};

use super::patterns::{BARE_YEAR, ISO_DATE, MONTH_YEAR};
use super::present_text;
use crate::models::record::{FieldValue, RawValue};

/// Full-date formats, tried in order. Named-month formats come before the
/// numeric ones so that `15/01/2024` style input is only considered once the
/// unambiguous shapes have failed.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // January 15, 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%Y-%m-%d",  // 2024-01-15
    "%d/%m/%Y",  // 15/01/2024
    "%m/%d/%Y",  // 01/15/2024
    "%d.%m.%Y",  // 15.01.2024
    "%Y/%m/%d",  // 2024/01/15
];

/// Month-and-year formats; these resolve to the first day of the month.
const MONTH_FORMATS: &[&str] = &[
    "%B %Y", // January 2024
    "%b %Y", // Jan 2024
];

/// Normalize a raw date value.
pub fn normalize_date(raw: &RawValue) -> FieldValue {
    present_text(raw)
        .and_then(|s| parse_date(&s))
        .map(FieldValue::Date)
        .unwrap_or(FieldValue::Absent)
}

/// Parse free-form date text into an ISO date string.
///
/// Text already shaped like `YYYY-MM-DD` is returned as is. Otherwise the
/// explicit formats are tried in priority order, then an embedded
/// "Month Year" phrase, then a bare 19xx/20xx year.
pub fn parse_date(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if ISO_DATE.is_match(s) {
        return Some(s.to_string());
    }

    for fmt in DATE_FORMATS {
        if let Some(date) = parse_with(s, fmt) {
            return Some(iso(date));
        }
    }

    for fmt in MONTH_FORMATS {
        let padded = format!("1 {}", s);
        let fmt = format!("%d {}", fmt);
        if let Some(date) = parse_with(&padded, &fmt) {
            return Some(iso(date));
        }
    }

    if let Some(caps) = MONTH_YEAR.captures(s) {
        let month = month_number(&caps[1]);
        let year: i32 = caps[2].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            return Some(iso(date));
        }
    }

    BARE_YEAR
        .find(s)
        .map(|m| format!("{}-01-01", m.as_str()))
}

fn parse_with(s: &str, fmt: &str) -> Option<NaiveDate> {
    // chrono accepts short years for %Y; contract dates always carry four digits.
    NaiveDate::parse_from_str(s, fmt)
        .ok()
        .filter(|d| (1000..=9999).contains(&d.year()))
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn month_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => 0,
    }
}
