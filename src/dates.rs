//! Calendar-day normalization and record lookup.
//!
//! Sheet cells arrive in whatever shape the spreadsheet exported them. Every
//! rule here builds the day from explicit year/month/day components so a bare
//! `YYYY-MM-DD` never shifts across a UTC boundary.

use crate::models::DevotionalRecord;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
];

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
];

pub fn canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

pub fn display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Strict `YYYY-MM-DD`, as produced by `canonical` and by `<input type="date">`.
pub fn parse_canonical(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    from_iso_prefix(value)
}

/// Normalizes a loosely formatted sheet date. Rules are tried in order:
/// ISO prefix, `M/D/YYYY`, then a local-time generic fallback.
pub fn normalize(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    from_iso_prefix(raw)
        .or_else(|| from_us_slashes(raw))
        .or_else(|| from_generic(raw))
}

/// First record, in input order, whose date normalizes to `requested`.
pub fn resolve(requested: NaiveDate, records: &[DevotionalRecord]) -> Option<&DevotionalRecord> {
    records
        .iter()
        .find(|record| normalize(&record.date) == Some(requested))
}

fn from_iso_prefix(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10)?;
    let bytes = head.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    // "2024-03-150" is not a truncatable timestamp.
    if raw[10..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let year = digits(&head[..4])?;
    let month = digits(&head[5..7])?;
    let day = digits(&head[8..10])?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn from_us_slashes(raw: &str) -> Option<NaiveDate> {
    let token = raw.split_whitespace().next()?;
    let mut parts = token.split('/');
    let month = parts.next()?;
    let day = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=2).contains(&month.len()) || !(1..=2).contains(&day.len()) || year.len() != 4 {
        return None;
    }

    NaiveDate::from_ymd_opt(digits(year)? as i32, digits(month)?, digits(day)?)
}

fn from_generic(raw: &str) -> Option<NaiveDate> {
    if let Ok(stamp) = DateTime::parse_from_rfc2822(raw) {
        return Some(stamp.with_timezone(&Local).date_naive());
    }

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        })
}

fn digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
