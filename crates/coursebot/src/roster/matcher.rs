//! Deciding which course rows concern which users, and when.
//!
//! Everything here is pure. The pipeline is a chain of named stages:
//! parse dates, keep the relevant rows, keep the ones in the time window.

use super::date::parse_course_date;
use super::registry::RegisteredUser;
use super::row::CourseRow;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;

/// Days ahead of the "tomorrow" reminder.
pub const TOMORROW_OFFSET_DAYS: i64 = 1;
/// Days ahead of the "next week" reminder.
pub const NEXT_WEEK_OFFSET_DAYS: i64 = 7;

/// A course row whose date cell parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedCourse<'a> {
    pub row: &'a CourseRow,
    pub date: NaiveDate,
}

/// A course due on a given day, with the users it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueCourse<'a> {
    pub course: DatedCourse<'a>,
    /// Deduplicated by external id, in registry order. May be empty.
    pub recipients: Vec<&'a RegisteredUser>,
}

/// Stage 1: attaches parsed dates, dropping rows whose date does not parse.
///
/// The month/day form takes its year from `today`.
pub fn dated<'a>(
    rows: &'a [CourseRow],
    today: NaiveDate,
) -> impl Iterator<Item = DatedCourse<'a>> + 'a {
    let year = today.year();
    rows.iter().filter_map(move |row| {
        parse_course_date(row.date_text(), year).map(|date| DatedCourse { row, date })
    })
}

/// Whether `display_name` occurs in the lecturer or facilitator cell.
///
/// This is plain case-sensitive substring containment, so `小明` also
/// matches `王小明` and `小明華`. An empty name matches nothing.
pub fn is_relevant(row: &CourseRow, display_name: &str) -> bool {
    !display_name.is_empty()
        && (row.lecturer().contains(display_name) || row.facilitator().contains(display_name))
}

/// Courses on or after `today` that concern `display_name`, in sheet order.
pub fn upcoming_for<'a>(
    display_name: &str,
    rows: &'a [CourseRow],
    today: NaiveDate,
) -> Vec<DatedCourse<'a>> {
    dated(rows, today)
        .filter(|c| is_relevant(c.row, display_name))
        .filter(|c| c.date >= today)
        .collect()
}

/// Courses dated exactly `today + offset_days`, each with the users it
/// concerns.
///
/// Rows that concern nobody are still returned, with no recipients.
pub fn due_in_offset<'a>(
    rows: &'a [CourseRow],
    users: &'a [RegisteredUser],
    today: NaiveDate,
    offset_days: i64,
) -> Vec<DueCourse<'a>> {
    let Some(target) = today.checked_add_signed(Duration::days(offset_days)) else {
        return Vec::new();
    };

    dated(rows, today)
        .filter(|c| c.date == target)
        .map(|course| DueCourse {
            course,
            recipients: recipients_for(course.row, users),
        })
        .collect()
}

/// Users a row concerns, one entry per external id.
pub fn recipients_for<'a>(row: &CourseRow, users: &'a [RegisteredUser]) -> Vec<&'a RegisteredUser> {
    let mut seen = HashSet::new();
    let mut recipients = Vec::new();
    for user in users {
        if is_relevant(row, &user.display_name) && seen.insert(user.external_id.as_str()) {
            recipients.push(user);
        }
    }
    recipients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::row::project;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn course(date: &str, lecturer: &str, facilitator: &str) -> CourseRow {
        project(
            &strings(&["日期", "講師", "引導師"]),
            &strings(&[date, lecturer, facilitator]),
        )
    }

    #[test]
    fn test_substring_policy() {
        let row = course("2025/3/5", "王小明", "小明、小美");
        assert!(is_relevant(&row, "小明"));
        assert!(is_relevant(&row, "小美"));
        assert!(is_relevant(&row, "王小明"));
        assert!(!is_relevant(&row, "小華"));
        assert!(!is_relevant(&row, ""));

        assert!(is_relevant(&course("2025/3/5", "小明華", ""), "小明"));
    }

    #[test]
    fn test_upcoming_excludes_past_and_unparseable() {
        let today = ymd(2024, 11, 20);
        let rows = vec![
            course("11月19日", "小明", ""),
            course("11月20日", "小明", ""),
            course("不知道", "小明", ""),
            course("", "小明", ""),
            course("2024/12/1", "", "小明、小美"),
            course("2024/12/2", "小華", ""),
        ];

        let upcoming = upcoming_for("小明", &rows, today);
        let dates: Vec<_> = upcoming.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![ymd(2024, 11, 20), ymd(2024, 12, 1)]);
        assert!(upcoming.iter().all(|c| c.date >= today));
    }

    #[test]
    fn test_upcoming_keeps_sheet_order() {
        let today = ymd(2024, 1, 1);
        let rows = vec![
            course("2024/5/1", "小明", ""),
            course("2024/2/1", "小明", ""),
        ];
        let upcoming = upcoming_for("小明", &rows, today);
        assert_eq!(upcoming[0].date, ymd(2024, 5, 1));
        assert_eq!(upcoming[1].date, ymd(2024, 2, 1));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let header = strings(&["日期", "講師", "引導師"]);
        let rows = vec![project(&header, &strings(&["11月21日 星期五", "小明", "小美"]))];
        let users = vec![
            RegisteredUser::new("U1", "小明", "ming"),
            RegisteredUser::new("U2", "小華", "hua"),
        ];
        let today = ymd(2024, 11, 20);

        let upcoming = upcoming_for("小明", &rows, today);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].row, &rows[0]);

        let due = due_in_offset(&rows, &users, today, TOMORROW_OFFSET_DAYS);
        assert_eq!(due.len(), 1);
        let ids: Vec<_> = due[0].recipients.iter().map(|u| u.external_id.as_str()).collect();
        assert_eq!(ids, vec!["U1"]);
    }

    #[test]
    fn test_due_is_an_exact_day_match() {
        let today = ymd(2025, 3, 1);
        let rows = vec![
            course("2025/3/2", "小明", ""),
            course("2025/3/3", "小明", ""),
            course("2025/3/7", "小明", ""),
            course("2025/3/8", "小明", ""),
            course("2025/3/9", "小明", ""),
            course("3月2日", "小美", ""),
        ];
        let users = vec![RegisteredUser::new("U1", "小明", "")];

        let tomorrow = due_in_offset(&rows, &users, today, TOMORROW_OFFSET_DAYS);
        let dates: Vec<_> = tomorrow.iter().map(|d| d.course.date).collect();
        assert_eq!(dates, vec![ymd(2025, 3, 2), ymd(2025, 3, 2)]);

        let next_week = due_in_offset(&rows, &users, today, NEXT_WEEK_OFFSET_DAYS);
        assert_eq!(next_week.len(), 1);
        assert_eq!(next_week[0].course.date, ymd(2025, 3, 8));
    }

    #[test]
    fn test_due_keeps_rows_without_recipients() {
        let today = ymd(2025, 3, 1);
        let rows = vec![course("2025/3/2", "某某", "")];
        let users = vec![RegisteredUser::new("U1", "小明", "")];

        let due = due_in_offset(&rows, &users, today, TOMORROW_OFFSET_DAYS);
        assert_eq!(due.len(), 1);
        assert!(due[0].recipients.is_empty());
    }

    #[test]
    fn test_recipients_are_deduplicated() {
        let row = course("2025/3/2", "小明", "小明、小美");
        let users = vec![
            RegisteredUser::new("U1", "小明", ""),
            RegisteredUser::new("U2", "小美", ""),
            RegisteredUser::new("U1", "小明", ""),
            RegisteredUser::new("U3", "", ""),
        ];

        let ids: Vec<_> = recipients_for(&row, &users)
            .iter()
            .map(|u| u.external_id.as_str())
            .collect();
        assert_eq!(ids, vec!["U1", "U2"]);
    }

    #[test]
    fn test_month_day_rows_use_year_of_today() {
        let rows = vec![course("1月2日", "小明", "")];
        let users = vec![RegisteredUser::new("U1", "小明", "")];

        // No year rollover: on Dec 31 the January row belongs to the current year.
        let due = due_in_offset(&rows, &users, ymd(2024, 12, 31), TOMORROW_OFFSET_DAYS);
        assert!(due.is_empty());

        let due = due_in_offset(&rows, &users, ymd(2025, 1, 1), TOMORROW_OFFSET_DAYS);
        assert_eq!(due.len(), 1);
    }
}
