//! Parsing of the free-text `日期` cell.
//!
//! The course sheet only ever holds two shapes of date:
//! - `11月21日 星期五` (month/day, the year is implied)
//! - `2025/3/5` (slash-delimited, full year)
//!
//! Anything else is treated as unparseable and silently dropped by callers.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static MONTH_DAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2})月([0-9]{1,2})日").unwrap());
static YEAR_MONTH_DAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").unwrap());

/// Parses a date cell into a calendar date.
///
/// `current_year` is used for the month/day form, which never carries a year.
///
/// # Returns
/// * `Some(date)` - The parsed date (a `NaiveDate` is already midnight-truncated)
/// * `None` - Empty text, an unknown shape, or an impossible calendar date
pub fn parse_course_date(text: &str, current_year: i32) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains('月') && text.contains('日') {
        parse_month_day(text, current_year)
    } else {
        parse_slashed(text)
    }
}

/// Extracts the first `<month>月<day>日` occurrence. Trailing text such as the
/// weekday is ignored.
fn parse_month_day(text: &str, year: i32) -> Option<NaiveDate> {
    let caps = MONTH_DAY_REGEX.captures(text)?;
    let month = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(2)?.as_str().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Handles `YYYY/M/D` by normalising slashes to hyphens first.
fn parse_slashed(text: &str) -> Option<NaiveDate> {
    if !text.contains('/') {
        return None;
    }

    let normalized = text.replace('/', "-");
    let caps = YEAR_MONTH_DAY_REGEX.captures(&normalized)?;
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Renders a date the way the query reply shows it, e.g. `3月5日`.
pub fn display_month_day(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}月{}日", date.month(), date.day())
}
