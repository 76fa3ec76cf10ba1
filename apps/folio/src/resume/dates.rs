//! Date Parser: free-text month/year tokens into first-of-month dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::resume::EndDate;

/// Which token shapes the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormats {
    /// `"Nov 2024"` and `"November 2024"` only.
    #[default]
    MonthYear,
    /// Month/year plus `MM/YYYY`, `YYYY-MM` and `YYYY-MM-DD`.
    Extended,
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses a single date token. Returns `None` for any shape the profile does
/// not list; there is no fallback to a general date parser.
pub fn parse_date(token: &str, formats: DateFormats) -> Option<NaiveDate> {
    let token = token.trim();
    if let Some(date) = parse_month_year(token) {
        return Some(date);
    }
    match formats {
        DateFormats::MonthYear => None,
        DateFormats::Extended => parse_numeric(token),
    }
}

fn parse_month_year(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split_whitespace();
    let (month, year) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let year = parse_year(year)?;
    let month = month.to_ascii_lowercase();
    let index = MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == month)
        .or_else(|| MONTH_NAMES.iter().position(|m| *m == month))?;
    first_of_month(year, index as u32 + 1)
}

fn parse_numeric(token: &str) -> Option<NaiveDate> {
    // MM/YYYY
    if let Some((month, year)) = token.split_once('/') {
        if month.len() > 2 {
            return None;
        }
        return first_of_month(parse_year(year)?, month.parse().ok()?);
    }
    // YYYY-MM or YYYY-MM-DD
    let mut parts = token.split('-');
    let year = parse_year(parts.next()?)?;
    let month = parts.next()?;
    if month.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    match parts.next() {
        None => first_of_month(year, month),
        Some(day) if day.len() == 2 && parts.next().is_none() => {
            // Validate the full date, then drop the day.
            NaiveDate::from_ymd_opt(year, month, day.parse().ok()?)?;
            first_of_month(year, month)
        }
        Some(_) => None,
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Splits the captured text of a date line into start and end dates.
///
/// Trailing metadata after the first `" · "` is dropped. The range separator
/// is an en-dash, then a spaced hyphen, then (month/year profile only) a bare
/// hyphen, so ISO tokens survive in the extended profile.
pub fn parse_date_range(text: &str, formats: DateFormats) -> (Option<NaiveDate>, EndDate) {
    let range = text.split(" · ").next().unwrap_or(text).trim();

    let split = range
        .split_once('–')
        .or_else(|| range.split_once(" - "))
        .or_else(|| match formats {
            DateFormats::MonthYear => range.split_once('-'),
            DateFormats::Extended => None,
        });

    let (start, end) = match split {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (range, None),
    };

    let start_date = parse_date(start, formats);
    let end_date = match end {
        Some(end) if end.to_lowercase().contains("present") => EndDate::Current,
        Some(end) => parse_date(end, formats)
            .map(EndDate::Ended)
            .unwrap_or(EndDate::Unknown),
        None => EndDate::Unknown,
    };
    (start_date, end_date)
}
