//! Calendar helpers: month arithmetic and `DD-MMM` due-date parsing.

use chrono::{Datelike, Local, NaiveDate};

use crate::errors::{TodoError, TodoResult};

/// Three-letter month abbreviations accepted in `DD-MMM` input
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Longest stretch between two leap years (1896 -> 1904)
const MAX_YEARS_TO_FEB_29: i32 = 8;

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Same day-of-month in the following month, clamped to that month's last day.
///
/// December rolls over into January of the next year. Returns `None` only when
/// the result falls outside chrono's representable range.
pub fn add_one_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Split `DD-MMM` text into `(day, month)` numbers.
///
/// Only the calendar shape is checked here (day 1-31, at most 29 days in
/// February, at most 30 in April/June/September/November); whether the day
/// exists in a particular year is decided when resolving.
pub fn split_day_month(input: &str) -> TodoResult<(u32, u32)> {
    let invalid = |reason: String| TodoError::InvalidDate {
        input: input.to_string(),
        reason,
    };

    let (day_text, month_text) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| invalid("expected format DD-MMM (e.g., 05-Jan)".to_string()))?;

    let day: u32 = day_text
        .parse()
        .map_err(|_| invalid("day must be numeric".to_string()))?;

    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month_text))
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| {
            invalid(format!(
                "'{month_text}' is not a 3-letter month abbreviation (Jan, Feb, etc.)"
            ))
        })?;

    if day == 0 || day > 31 {
        return Err(invalid("day must be between 1 and 31".to_string()));
    }
    if month == 2 && day > 29 {
        return Err(invalid("February cannot have more than 29 days".to_string()));
    }
    if matches!(month, 4 | 6 | 9 | 11) && day > 30 {
        return Err(invalid(format!(
            "{} cannot have more than 30 days",
            MONTHS[month as usize - 1]
        )));
    }

    Ok((day, month))
}

/// Resolve `DD-MMM` to the nearest existing date on or after `today`.
///
/// A date that already passed this year moves to next year; `29-Feb` moves
/// forward to the next leap year.
pub fn parse_day_month(input: &str, today: NaiveDate) -> TodoResult<NaiveDate> {
    let (day, month) = split_day_month(input)?;

    (today.year()..=today.year() + MAX_YEARS_TO_FEB_29)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|candidate| *candidate >= today)
        .ok_or_else(|| TodoError::InvalidDate {
            input: input.to_string(),
            reason: "no such calendar date".to_string(),
        })
}

/// Render a date as `DD-MMM` (e.g., `05-Jan`)
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d-%b").to_string()
}
